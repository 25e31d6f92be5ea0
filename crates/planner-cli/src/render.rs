//! Renderer that logs changes and prints the grid on demand.

use planner_grid::{Grid, Renderer, SelectionSet, render_text};
use planner_model::{Assignment, CellCoord};

/// Counts and logs change notifications.
///
/// A one-shot command has nothing to redraw while it runs; the grid is
/// printed once at the end with [`TerminalRenderer::draw`].
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    cells_changed: usize,
    selection_changes: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells_changed(&self) -> usize {
        self.cells_changed
    }

    pub fn selection_changes(&self) -> usize {
        self.selection_changes
    }

    /// The grid as text with the selection marked.
    pub fn draw(&self, grid: &Grid, selection: &SelectionSet) -> String {
        render_text(grid, selection)
    }
}

impl Renderer for TerminalRenderer {
    fn cell_changed(&mut self, coord: CellCoord, assignment: Option<&Assignment>) {
        self.cells_changed += 1;
        match assignment {
            Some(assignment) => tracing::trace!("cell {coord} -> {}", assignment.glyph),
            None => tracing::trace!("cell {coord} cleared"),
        }
    }

    fn selection_changed(&mut self, added: &[CellCoord], removed: &[CellCoord]) {
        self.selection_changes += 1;
        tracing::trace!(
            added = added.len(),
            removed = removed.len(),
            "selection changed"
        );
    }
}
