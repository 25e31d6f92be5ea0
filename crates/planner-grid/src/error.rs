//! Error types for the plot design grid.

use planner_model::{CellCoord, GridDims};
use thiserror::Error;

/// Local contract violations. These are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    /// A cell coordinate outside the grid.
    #[error("cell {coord} is outside the {dims} grid")]
    CellOutOfBounds { coord: CellCoord, dims: GridDims },

    /// A row index outside the grid.
    #[error("row {row} is outside the {dims} grid")]
    RowOutOfBounds { row: u32, dims: GridDims },

    /// A column index outside the grid.
    #[error("column {col} is outside the {dims} grid")]
    ColOutOfBounds { col: u32, dims: GridDims },

    /// A snapshot that cannot be loaded into the grid.
    #[error("invalid cell snapshot: {0}")]
    Validation(String),
}

impl GridError {
    /// True for the out-of-range variants.
    #[must_use]
    pub fn is_bounds(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

/// A persistence request that did not succeed.
///
/// The cause is opaque to the grid: network failure, an error status or an
/// undecodable response all look the same here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    retryable: bool,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    /// A failure that may succeed if the caller asks again.
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

/// Failure of an operation that talks to the backend and then touches the
/// grid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DesignError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_errors_name_the_grid() {
        let err = GridError::CellOutOfBounds {
            coord: CellCoord::new(3, 0),
            dims: GridDims::new(3, 4),
        };
        assert_eq!(err.to_string(), "cell (3, 0) is outside the 3x4 grid");
        assert!(err.is_bounds());
        assert!(!GridError::Validation("x".into()).is_bounds());
    }

    #[test]
    fn request_errors_keep_retry_hint() {
        assert!(RequestError::retryable("timeout").is_retryable());
        assert!(!RequestError::new("404").is_retryable());
        let err: DesignError = RequestError::new("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
