//! JSON records exchanged with the Plot Planner backend.

use serde::{Deserialize, Serialize};

use crate::coord::CellCoord;
use crate::error::Result;
use crate::ids::{PlantId, PlantlistEntryId};
use crate::symbol::SymbolGlyph;

/// One occupied cell from `GET /query/plot_cells/{plot}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSymbolRecord {
    pub cell_x: i64,
    pub cell_y: i64,
    /// Icon markup of the symbol currently shown in the cell.
    pub symbol: String,
    /// Plant-list entry behind the symbol, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plantlists_plants_id: Option<PlantlistEntryId>,
}

impl CellSymbolRecord {
    pub fn coord(&self) -> Result<CellCoord> {
        CellCoord::from_wire(self.cell_x, self.cell_y)
    }

    pub fn glyph(&self) -> SymbolGlyph {
        SymbolGlyph::from_markup(&self.symbol)
    }
}

/// One plant of a plant list from `GET /query/plantlist/{plantlist}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantlistEntryRecord {
    pub plantlist_plants_id: PlantlistEntryId,
    pub plant_id: PlantId,
    pub plant_name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl PlantlistEntryRecord {
    /// The entry's glyph, or the default seedling when none was chosen.
    pub fn glyph(&self) -> SymbolGlyph {
        match self.symbol.as_deref().map(str::trim) {
            Some(markup) if !markup.is_empty() => SymbolGlyph::from_markup(markup),
            _ => SymbolGlyph::default(),
        }
    }
}

/// Body of `GET /query/plantlist/{plantlist}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantlistEntriesResponse {
    #[serde(default)]
    pub plantlist_plants_symbols: Vec<PlantlistEntryRecord>,
}

/// Body of `POST /plantlists/{plantlist}/plant/{plant}/symbol/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPayload {
    pub symbol: String,
}

/// Body of `POST /api/plants/pagination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub pagination_link: String,
}
