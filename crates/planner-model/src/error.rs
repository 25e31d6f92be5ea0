use thiserror::Error;

use crate::catalog::{PageNav, SearchFilter};
use crate::connection::EntityKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("cannot connect a {0} to another {0}")]
    InvalidConnection(EntityKind),
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
    #[error("negative cell coordinate (x={x}, y={y})")]
    NegativeCoordinate { x: i64, y: i64 },
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },
    #[error("'{value}' is not a valid {filter} value")]
    InvalidFilterValue { filter: SearchFilter, value: String },
    #[error("no {0} page link available")]
    NoSuchPage(PageNav),
    #[error("plant search rejected: {0}")]
    SearchRejected(String),
    #[error("malformed catalog payload: {0}")]
    MalformedCatalog(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
