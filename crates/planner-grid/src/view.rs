//! Plain-text projection of a design.
//!
//! Each cell is three characters wide. Selected cells are bracketed, empty
//! cells show `.` and painted cells show the first letter of their icon
//! name (`?` for markup that could not be parsed).
//!
//! ```text
//! #   0  1  2
//! 0   . [l] .
//! 1  [.] .  .
//! ```

use std::fmt::Write as _;

use planner_model::Assignment;

use crate::grid::Grid;
use crate::selection::SelectionSet;

/// Render `grid` with `selection` marked.
pub fn render_text(grid: &Grid, selection: &SelectionSet) -> String {
    let dims = grid.dims();
    let mut lines = Vec::with_capacity(dims.rows as usize + 1);

    let mut header = String::from("#  ");
    for col in 0..dims.cols {
        let _ = write!(header, "{col:^3}");
    }
    lines.push(header.trim_end().to_string());

    for row in 0..dims.rows {
        let mut line = format!("{row:<3}");
        for coord in dims.row_coords(row) {
            let mark = cell_mark(grid.get(coord).ok().flatten());
            if selection.contains(coord) {
                let _ = write!(line, "[{mark}]");
            } else {
                let _ = write!(line, " {mark} ");
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn cell_mark(assignment: Option<&Assignment>) -> char {
    assignment.map_or('.', |assignment| {
        assignment.glyph.short_name().chars().next().unwrap_or('?')
    })
}
