//! Symbols available for painting, keyed by plant-list entry.

use std::collections::BTreeMap;

use planner_model::{PlantlistEntryId, SymbolGlyph};

use crate::api::AssignableEntry;

/// One paintable plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub plant_name: String,
    pub glyph: SymbolGlyph,
    /// False when the glyph is the fallback seedling.
    pub has_own_symbol: bool,
}

/// The assignable entries of one plant list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolPalette {
    entries: BTreeMap<PlantlistEntryId, PaletteEntry>,
}

impl SymbolPalette {
    pub fn new(entries: impl IntoIterator<Item = AssignableEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let has_own_symbol = entry.glyph.is_some();
                let palette_entry = PaletteEntry {
                    plant_name: entry.plant_name,
                    glyph: entry.glyph.unwrap_or_default(),
                    has_own_symbol,
                };
                (entry.entry_id, palette_entry)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, entry_id: PlantlistEntryId) -> Option<&PaletteEntry> {
        self.entries.get(&entry_id)
    }

    /// The glyph to paint for `entry_id`; the default seedling when the
    /// entry is unknown.
    pub fn glyph_for(&self, entry_id: PlantlistEntryId) -> SymbolGlyph {
        self.get(entry_id)
            .map(|entry| entry.glyph.clone())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlantlistEntryId, &PaletteEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
