//! Plot design grid for Plot Planner.
//!
//! A [`PlotDesign`] owns a [`Grid`] of cell assignments, a [`SelectionSet`]
//! driven by cell, row and column toggles, and a [`Renderer`] that mirrors
//! every change. Painting and erasing update the grid at once and hand back
//! a [`PendingBatch`] of backend writes that is sent through any
//! [`PersistenceApi`] implementation.
//!
//! # Example
//!
//! ```
//! use planner_grid::{NullRenderer, PlotDesign};
//! use planner_model::{CellCoord, GridDims, PlantlistEntryId, PlotId, SymbolGlyph};
//!
//! let mut design = PlotDesign::new(PlotId(1), GridDims::new(3, 4), NullRenderer);
//! design.toggle_row(1).unwrap();
//! design.toggle_col(2).unwrap();
//! assert_eq!(design.selection().len(), 6);
//!
//! let batch = design.apply_symbol(&SymbolGlyph::default(), PlantlistEntryId(42));
//! assert_eq!(batch.len(), 6);
//! assert!(design.grid().is_assigned(CellCoord::new(0, 2)));
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod grid;
pub mod palette;
pub mod render;
pub mod selection;
pub mod view;

pub use api::{AssignableEntry, CellSymbol, PersistenceApi};
pub use engine::{BatchReport, CellFailure, CellRequest, PendingBatch, PlotDesign};
pub use error::{DesignError, GridError, RequestError, Result};
pub use grid::Grid;
pub use palette::{PaletteEntry, SymbolPalette};
pub use render::{NullRenderer, RecordingRenderer, RenderEvent, Renderer};
pub use selection::{SelectionDelta, SelectionSet, ToggleMode};
pub use view::render_text;
