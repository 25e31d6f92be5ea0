//! The cell matrix of one plot design session.

use planner_model::{Assignment, CellCoord, GridDims};

use crate::error::{GridError, Result};

/// `rows x cols` cells, each optionally holding an [`Assignment`].
///
/// Dimensions are fixed when the grid is created. The grid does no I/O and
/// knows nothing about rendering; mutators report what changed so the owner
/// can notify a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    cells: Vec<Option<Assignment>>,
}

impl Grid {
    /// An empty grid.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Replace every cell from an authoritative snapshot.
    ///
    /// Cells not mentioned become empty. If any coordinate is out of bounds
    /// nothing changes. When a coordinate appears twice the later entry wins.
    /// Returns the coordinates whose content differs from before, in
    /// row-major order.
    pub fn load<I>(&mut self, cells: I) -> Result<Vec<CellCoord>>
    where
        I: IntoIterator<Item = (CellCoord, Option<Assignment>)>,
    {
        let mut next = vec![None; self.dims.cell_count()];
        for (coord, assignment) in cells {
            if !self.dims.contains(coord) {
                return Err(GridError::Validation(format!(
                    "cell {coord} is outside the {} grid",
                    self.dims
                )));
            }
            next[self.dims.index_of(coord)] = assignment;
        }

        let changed = self
            .dims
            .coords()
            .filter(|coord| {
                let index = self.dims.index_of(*coord);
                self.cells[index] != next[index]
            })
            .collect();
        self.cells = next;
        Ok(changed)
    }

    /// Put `assignment` in a cell, returning what was there before.
    pub fn set_assignment(
        &mut self,
        coord: CellCoord,
        assignment: Assignment,
    ) -> Result<Option<Assignment>> {
        let index = self.index(coord)?;
        Ok(self.cells[index].replace(assignment))
    }

    /// Empty a cell, returning what was there before.
    ///
    /// Clearing an empty cell is not an error.
    pub fn clear_assignment(&mut self, coord: CellCoord) -> Result<Option<Assignment>> {
        let index = self.index(coord)?;
        Ok(self.cells[index].take())
    }

    pub fn get(&self, coord: CellCoord) -> Result<Option<&Assignment>> {
        let index = self.index(coord)?;
        Ok(self.cells[index].as_ref())
    }

    /// True when the cell is in bounds and holds an assignment.
    pub fn is_assigned(&self, coord: CellCoord) -> bool {
        self.dims.contains(coord) && self.cells[self.dims.index_of(coord)].is_some()
    }

    /// Occupied cells in row-major order.
    pub fn assigned(&self) -> impl Iterator<Item = (CellCoord, &Assignment)> + '_ {
        self.dims
            .coords()
            .zip(self.cells.iter())
            .filter_map(|(coord, cell)| cell.as_ref().map(|assignment| (coord, assignment)))
    }

    pub fn assigned_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index(&self, coord: CellCoord) -> Result<usize> {
        if self.dims.contains(coord) {
            Ok(self.dims.index_of(coord))
        } else {
            Err(GridError::CellOutOfBounds {
                coord,
                dims: self.dims,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use planner_model::{PlantlistEntryId, SymbolGlyph};

    use super::*;

    fn leaf(entry: u32) -> Assignment {
        Assignment::new(PlantlistEntryId(entry), SymbolGlyph::new("fas fa-leaf", "#00aa00"))
    }

    #[test]
    fn set_then_get_returns_assignment() {
        let mut grid = Grid::new(GridDims::new(2, 3));
        let coord = CellCoord::new(1, 2);
        assert_eq!(grid.set_assignment(coord, leaf(1)).unwrap(), None);
        assert_eq!(grid.get(coord).unwrap(), Some(&leaf(1)));
        assert_eq!(grid.set_assignment(coord, leaf(2)).unwrap(), Some(leaf(1)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut grid = Grid::new(GridDims::new(2, 2));
        let before = grid.clone();
        assert_eq!(grid.clear_assignment(CellCoord::new(0, 0)).unwrap(), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut grid = Grid::new(GridDims::new(2, 2));
        let outside = CellCoord::new(2, 0);
        assert!(grid.get(outside).unwrap_err().is_bounds());
        assert!(grid.set_assignment(outside, leaf(1)).is_err());
        assert!(grid.clear_assignment(CellCoord::new(0, 2)).is_err());
        assert!(!grid.is_assigned(outside));
    }

    #[test]
    fn load_replaces_everything_and_reports_changes() {
        let mut grid = Grid::new(GridDims::new(2, 2));
        grid.set_assignment(CellCoord::new(0, 0), leaf(1)).unwrap();
        grid.set_assignment(CellCoord::new(1, 1), leaf(2)).unwrap();

        let changed = grid
            .load([(CellCoord::new(1, 1), Some(leaf(2))), (CellCoord::new(0, 1), Some(leaf(3)))])
            .unwrap();

        assert_eq!(changed, vec![CellCoord::new(0, 0), CellCoord::new(0, 1)]);
        assert_eq!(grid.get(CellCoord::new(0, 0)).unwrap(), None);
        assert_eq!(grid.assigned_count(), 2);
    }

    #[test]
    fn load_rejects_out_of_bounds_without_touching_state() {
        let mut grid = Grid::new(GridDims::new(2, 2));
        grid.set_assignment(CellCoord::new(0, 0), leaf(1)).unwrap();
        let before = grid.clone();

        let err = grid
            .load([(CellCoord::new(0, 1), Some(leaf(2))), (CellCoord::new(5, 0), None)])
            .unwrap_err();

        assert!(matches!(err, GridError::Validation(_)));
        assert_eq!(grid, before);
    }

    #[test]
    fn assigned_iterates_row_major() {
        let mut grid = Grid::new(GridDims::new(2, 2));
        grid.set_assignment(CellCoord::new(1, 0), leaf(2)).unwrap();
        grid.set_assignment(CellCoord::new(0, 1), leaf(1)).unwrap();
        let coords: Vec<_> = grid.assigned().map(|(coord, _)| coord).collect();
        assert_eq!(coords, vec![CellCoord::new(0, 1), CellCoord::new(1, 0)]);
    }
}
