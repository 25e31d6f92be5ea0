//! Cells marked for a bulk operation.
//!
//! Row and column headers each carry a [`ToggleMode`]. Clicking a header in
//! `Add` mode unions the whole row (or column) into the selection; in
//! `Remove` mode it subtracts it. Either way the header flips. Headers never
//! look at each other, so toggling row 2 and then column 3 selects exactly
//! the union of both.

use planner_model::{CellCoord, GridDims};

use crate::error::{GridError, Result};

/// What the next click on a row or column header does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleMode {
    #[default]
    Add,
    Remove,
}

impl ToggleMode {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Add => Self::Remove,
            Self::Remove => Self::Add,
        }
    }
}

/// Coordinates added to and removed from a selection by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub added: Vec<CellCoord>,
    pub removed: Vec<CellCoord>,
}

impl SelectionDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The set of selected cells plus the row and column header modes.
///
/// Membership is stored as one flag per cell, so select-all and
/// deselect-all are a single pass over the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    dims: GridDims,
    selected: Vec<bool>,
    count: usize,
    row_modes: Vec<ToggleMode>,
    col_modes: Vec<ToggleMode>,
}

impl SelectionSet {
    /// Nothing selected, every header in `Add` mode.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            selected: vec![false; dims.cell_count()],
            count: 0,
            row_modes: vec![ToggleMode::Add; dims.rows as usize],
            col_modes: vec![ToggleMode::Add; dims.cols as usize],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// False for unselected and out-of-bounds coordinates alike.
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.dims.contains(coord) && self.selected[self.dims.index_of(coord)]
    }

    /// Currently selected coordinates in row-major order.
    ///
    /// Each call walks the live state, so the iterator always reflects the
    /// selection at the time it is created.
    pub fn members(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.dims
            .coords()
            .zip(self.selected.iter())
            .filter_map(|(coord, &selected)| selected.then_some(coord))
    }

    pub fn row_mode(&self, row: u32) -> Result<ToggleMode> {
        self.row_modes
            .get(row as usize)
            .copied()
            .ok_or(GridError::RowOutOfBounds {
                row,
                dims: self.dims,
            })
    }

    pub fn col_mode(&self, col: u32) -> Result<ToggleMode> {
        self.col_modes
            .get(col as usize)
            .copied()
            .ok_or(GridError::ColOutOfBounds {
                col,
                dims: self.dims,
            })
    }

    /// Flip the membership of one cell. Header modes are untouched.
    pub fn toggle_cell(&mut self, coord: CellCoord) -> Result<SelectionDelta> {
        if !self.dims.contains(coord) {
            return Err(GridError::CellOutOfBounds {
                coord,
                dims: self.dims,
            });
        }
        let mut delta = SelectionDelta::default();
        if self.contains(coord) {
            self.remove(coord);
            delta.removed.push(coord);
        } else {
            self.insert(coord);
            delta.added.push(coord);
        }
        Ok(delta)
    }

    /// Union or subtract a whole row depending on its mode, then flip the
    /// mode.
    pub fn toggle_row(&mut self, row: u32) -> Result<SelectionDelta> {
        let mode = self.row_mode(row)?;
        let delta = self.apply_mode(mode, self.dims.row_coords(row));
        self.row_modes[row as usize] = mode.flipped();
        Ok(delta)
    }

    /// Union or subtract a whole column depending on its mode, then flip
    /// the mode.
    pub fn toggle_col(&mut self, col: u32) -> Result<SelectionDelta> {
        let mode = self.col_mode(col)?;
        let delta = self.apply_mode(mode, self.dims.col_coords(col));
        self.col_modes[col as usize] = mode.flipped();
        Ok(delta)
    }

    /// Select every cell and put every header in `Remove` mode.
    pub fn select_all(&mut self) -> SelectionDelta {
        let delta = self.apply_mode(ToggleMode::Add, self.dims.coords());
        self.row_modes.fill(ToggleMode::Remove);
        self.col_modes.fill(ToggleMode::Remove);
        delta
    }

    /// Clear the selection and put every header back in `Add` mode.
    pub fn deselect_all(&mut self) -> SelectionDelta {
        let delta = self.apply_mode(ToggleMode::Remove, self.dims.coords());
        self.row_modes.fill(ToggleMode::Add);
        self.col_modes.fill(ToggleMode::Add);
        delta
    }

    fn apply_mode(
        &mut self,
        mode: ToggleMode,
        coords: impl Iterator<Item = CellCoord>,
    ) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        for coord in coords {
            match mode {
                ToggleMode::Add => {
                    if self.insert(coord) {
                        delta.added.push(coord);
                    }
                }
                ToggleMode::Remove => {
                    if self.remove(coord) {
                        delta.removed.push(coord);
                    }
                }
            }
        }
        delta
    }

    fn insert(&mut self, coord: CellCoord) -> bool {
        let slot = &mut self.selected[self.dims.index_of(coord)];
        if *slot {
            return false;
        }
        *slot = true;
        self.count += 1;
        true
    }

    fn remove(&mut self, coord: CellCoord) -> bool {
        let slot = &mut self.selected[self.dims.index_of(coord)];
        if !*slot {
            return false;
        }
        *slot = false;
        self.count -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: u32, col: u32) -> CellCoord {
        CellCoord::new(row, col)
    }

    #[test]
    fn row_then_column_is_a_union() {
        let mut selection = SelectionSet::new(GridDims::new(3, 4));

        let row = selection.toggle_row(1).unwrap();
        assert_eq!(row.added, vec![c(1, 0), c(1, 1), c(1, 2), c(1, 3)]);

        let col = selection.toggle_col(2).unwrap();
        assert_eq!(col.added, vec![c(0, 2), c(2, 2)]);

        let members: Vec<_> = selection.members().collect();
        assert_eq!(
            members,
            vec![c(0, 2), c(1, 0), c(1, 1), c(1, 2), c(1, 3), c(2, 2)]
        );
        assert_eq!(selection.len(), 6);
        assert_eq!(selection.row_mode(1).unwrap(), ToggleMode::Remove);
        assert_eq!(selection.col_mode(2).unwrap(), ToggleMode::Remove);
        assert_eq!(selection.row_mode(0).unwrap(), ToggleMode::Add);
    }

    #[test]
    fn removing_a_row_leaves_other_rows_alone() {
        let mut selection = SelectionSet::new(GridDims::new(3, 3));
        selection.toggle_col(0).unwrap();
        selection.toggle_row(1).unwrap();

        let delta = selection.toggle_row(1).unwrap();

        assert_eq!(delta.removed, vec![c(1, 0), c(1, 1), c(1, 2)]);
        let members: Vec<_> = selection.members().collect();
        assert_eq!(members, vec![c(0, 0), c(2, 0)]);
        // Column 0 still thinks it is fully selected.
        assert_eq!(selection.col_mode(0).unwrap(), ToggleMode::Remove);
    }

    #[test]
    fn toggle_cell_flips_membership_only() {
        let mut selection = SelectionSet::new(GridDims::new(2, 2));
        assert_eq!(selection.toggle_cell(c(0, 1)).unwrap().added, vec![c(0, 1)]);
        assert!(selection.contains(c(0, 1)));
        assert_eq!(selection.toggle_cell(c(0, 1)).unwrap().removed, vec![c(0, 1)]);
        assert!(selection.is_empty());
        assert_eq!(selection.row_mode(0).unwrap(), ToggleMode::Add);
    }

    #[test]
    fn select_all_and_deselect_all_reset_modes() {
        let mut selection = SelectionSet::new(GridDims::new(2, 3));
        selection.toggle_cell(c(0, 0)).unwrap();

        let delta = selection.select_all();
        assert_eq!(delta.added.len(), 5);
        assert_eq!(selection.len(), 6);
        assert_eq!(selection.row_mode(1).unwrap(), ToggleMode::Remove);
        assert_eq!(selection.col_mode(2).unwrap(), ToggleMode::Remove);

        let delta = selection.deselect_all();
        assert_eq!(delta.removed.len(), 6);
        assert_eq!(selection.members().count(), 0);
        assert!((0..2).all(|r| selection.row_mode(r).unwrap() == ToggleMode::Add));
        assert!((0..3).all(|col| selection.col_mode(col).unwrap() == ToggleMode::Add));
    }

    #[test]
    fn members_reflects_later_changes() {
        let mut selection = SelectionSet::new(GridDims::new(1, 3));
        selection.toggle_cell(c(0, 0)).unwrap();
        assert_eq!(selection.members().count(), 1);
        selection.toggle_cell(c(0, 2)).unwrap();
        assert_eq!(selection.members().count(), 2);
    }

    #[test]
    fn out_of_range_headers_fail() {
        let mut selection = SelectionSet::new(GridDims::new(2, 2));
        assert_eq!(
            selection.toggle_row(2),
            Err(GridError::RowOutOfBounds {
                row: 2,
                dims: GridDims::new(2, 2)
            })
        );
        assert!(selection.toggle_col(9).is_err());
        assert!(selection.toggle_cell(c(0, 2)).is_err());
        assert!(selection.is_empty());
    }
}
