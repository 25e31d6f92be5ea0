//! Domain types shared by the Plot Planner crates.
//!
//! - [`coord`]: cell coordinates and grid dimensions
//! - [`symbol`]: plant symbols and cell assignments
//! - [`connection`]: project / plot / plant list links
//! - [`catalog`]: plant search and pagination
//! - [`records`]: JSON records exchanged with the backend

pub mod catalog;
pub mod connection;
pub mod coord;
pub mod error;
pub mod ids;
pub mod records;
pub mod symbol;

pub use catalog::{CatalogPage, CatalogPlant, PageLinks, PageNav, PlantSearch, SearchFilter};
pub use connection::{ConnectionItem, ConnectionState, EntityKind, Link, LinkAction};
pub use coord::{CellCoord, GridDims};
pub use error::{ModelError, Result};
pub use ids::{PlantId, PlantlistEntryId, PlantlistId, PlotId, ProjectId};
pub use records::{
    CellSymbolRecord, PaginationRequest, PlantlistEntriesResponse, PlantlistEntryRecord,
    SymbolPayload,
};
pub use symbol::{Assignment, SymbolGlyph};
