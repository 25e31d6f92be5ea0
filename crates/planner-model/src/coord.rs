//! Cell coordinates and grid dimensions.
//!
//! Coordinates are 0-indexed `(row, col)` pairs. The backend names the same
//! axes `cell_y` (row) and `cell_x` (column); the conversions below are the
//! only place that mapping is spelled out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One addressable position in a plot grid.
///
/// Ordering is row-major, so sorted coordinates read left to right, top to
/// bottom.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build a coordinate from the backend's `cell_x`/`cell_y` pair.
    pub fn from_wire(cell_x: i64, cell_y: i64) -> Result<Self> {
        let (Ok(col), Ok(row)) = (u32::try_from(cell_x), u32::try_from(cell_y)) else {
            return Err(ModelError::NegativeCoordinate {
                x: cell_x,
                y: cell_y,
            });
        };
        Ok(Self { row, col })
    }

    /// `cell_x` as the backend expects it.
    pub const fn cell_x(self) -> u32 {
        self.col
    }

    /// `cell_y` as the backend expects it.
    pub const fn cell_y(self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Parses `"ROW,COL"`, the form used on the command line.
impl FromStr for CellCoord {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL but got '{s}'"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row '{row}': {e}"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column '{col}': {e}"))?;
        Ok(Self { row, col })
    }
}

/// Size of a plot grid.
///
/// A plot's `length` gives the number of rows and its `width` the number of
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: u32,
    pub cols: u32,
}

impl GridDims {
    /// Largest grid a design session will allocate.
    pub const MAX_CELLS: usize = 10_000;

    /// Trusted dimensions. Use [`GridDims::checked`] for sizes that come
    /// from outside the program.
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Dimensions holding at most [`GridDims::MAX_CELLS`] cells.
    pub fn checked(rows: u32, cols: u32) -> Result<Self> {
        let cells = u64::from(rows) * u64::from(cols);
        if cells > Self::MAX_CELLS as u64 {
            return Err(ModelError::InvalidDimensions {
                rows: i64::from(rows),
                cols: i64::from(cols),
            });
        }
        Ok(Self { rows, cols })
    }

    /// Dimensions from the backend's signed plot columns.
    pub fn from_plot(length: i64, width: i64) -> Result<Self> {
        match (u32::try_from(length), u32::try_from(width)) {
            (Ok(rows), Ok(cols)) => Self::checked(rows, cols),
            _ => Err(ModelError::InvalidDimensions {
                rows: length,
                cols: width,
            }),
        }
    }

    pub const fn contains(self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub const fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row-major index of an in-bounds coordinate.
    pub const fn index_of(self, coord: CellCoord) -> usize {
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    /// Every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = CellCoord> + Clone {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellCoord { row, col }))
    }

    /// Coordinates of a single row.
    pub fn row_coords(self, row: u32) -> impl Iterator<Item = CellCoord> + Clone {
        (0..self.cols).map(move |col| CellCoord { row, col })
    }

    /// Coordinates of a single column.
    pub fn col_coords(self, col: u32) -> impl Iterator<Item = CellCoord> + Clone {
        (0..self.rows).map(move |row| CellCoord { row, col })
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Parses `"ROWSxCOLS"`, e.g. `3x4`, with the same limits as
/// [`GridDims::from_plot`].
impl FromStr for GridDims {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (rows, cols) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected ROWSxCOLS but got '{s}'"))?;
        let rows = rows
            .trim()
            .parse()
            .map_err(|e| format!("invalid row count '{rows}': {e}"))?;
        let cols = cols
            .trim()
            .parse()
            .map_err(|e| format!("invalid column count '{cols}': {e}"))?;
        Self::from_plot(rows, cols).map_err(|e| {
            format!("{e}: sizes must be positive and hold at most {} cells", Self::MAX_CELLS)
        })
    }
}
