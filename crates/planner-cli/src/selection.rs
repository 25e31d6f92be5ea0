//! Turning command-line selection flags into selection toggles.

use planner_grid::{GridError, PlotDesign, Renderer};
use planner_model::CellCoord;

/// Selection requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    pub all: bool,
    pub rows: Vec<u32>,
    pub cols: Vec<u32>,
    pub cells: Vec<CellCoord>,
}

impl SelectionPlan {
    pub fn is_empty(&self) -> bool {
        !self.all && self.rows.is_empty() && self.cols.is_empty() && self.cells.is_empty()
    }

    /// Apply the plan to a design: select-all, then row, column and cell
    /// toggles in the order given.
    ///
    /// Stops at the first out-of-range index.
    pub fn apply<R: Renderer>(&self, design: &mut PlotDesign<R>) -> Result<(), GridError> {
        if self.all {
            design.select_all();
        }
        for &row in &self.rows {
            design.toggle_row(row)?;
        }
        for &col in &self.cols {
            design.toggle_col(col)?;
        }
        for &cell in &self.cells {
            design.toggle_cell(cell)?;
        }
        tracing::debug!("Selected {} cells", design.selection().len());
        Ok(())
    }
}
