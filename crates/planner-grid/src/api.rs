//! Persistence seam between the grid model and the backend.

use planner_model::{Assignment, CellCoord, PlantlistEntryId, PlantlistId, PlotId, SymbolGlyph};

use crate::error::RequestError;

/// One occupied cell in a plot snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSymbol {
    pub coord: CellCoord,
    pub glyph: SymbolGlyph,
    pub entry_id: Option<PlantlistEntryId>,
}

impl CellSymbol {
    pub fn into_assignment(self) -> (CellCoord, Assignment) {
        let assignment = Assignment {
            entry_id: self.entry_id,
            glyph: self.glyph,
        };
        (self.coord, assignment)
    }
}

/// A plant-list entry that can be painted onto cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignableEntry {
    pub entry_id: PlantlistEntryId,
    pub plant_name: String,
    /// `None` when no symbol was chosen for the plant yet.
    pub glyph: Option<SymbolGlyph>,
}

/// Remote storage for cell symbols.
///
/// Implementations run on the caller's task; returned futures need not be
/// `Send`. Calls are independent of each other and may complete in any
/// order.
#[allow(async_fn_in_trait)]
pub trait PersistenceApi {
    async fn add_cell_symbol(
        &self,
        plot: PlotId,
        coord: CellCoord,
        entry: PlantlistEntryId,
    ) -> Result<(), RequestError>;

    async fn delete_cell_symbol(&self, plot: PlotId, coord: CellCoord)
    -> Result<(), RequestError>;

    async fn fetch_plot_cell_symbols(&self, plot: PlotId) -> Result<Vec<CellSymbol>, RequestError>;

    async fn fetch_plantlist_assignable_entries(
        &self,
        plantlist: PlantlistId,
    ) -> Result<Vec<AssignableEntry>, RequestError>;
}
