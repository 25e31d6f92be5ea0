//! Backend paths.
//!
//! Cell paths use the backend's axis names: `x` is the column and `y` the
//! row.

use planner_model::{
    CellCoord, EntityKind, PlantId, PlantlistEntryId, PlantlistId, PlotId,
};

/// `POST` target of a plant search.
pub const PLANT_SEARCH: &str = "/api/plants/search";

/// `POST` target for following a catalog page link.
pub const PLANT_PAGINATION: &str = "/api/plants/pagination";

pub fn add_cell_symbol(plot: PlotId, coord: CellCoord, entry: PlantlistEntryId) -> String {
    format!(
        "/plots/{plot}/add/symbol/{entry}/x/{}/y/{}",
        coord.cell_x(),
        coord.cell_y()
    )
}

pub fn delete_cell_symbol(plot: PlotId, coord: CellCoord) -> String {
    format!(
        "/plots/{plot}/delete/cell/x/{}/y/{}",
        coord.cell_x(),
        coord.cell_y()
    )
}

pub fn plot_cells(plot: PlotId) -> String {
    format!("/query/plot_cells/{plot}")
}

pub fn plantlist_entries(plantlist: PlantlistId) -> String {
    format!("/query/plantlist/{plantlist}")
}

/// Linked and linkable `secondary` entities of one `primary` entity.
pub fn connections(primary: EntityKind, primary_id: u32, secondary: EntityKind) -> String {
    format!(
        "/query/{}/{primary_id}/{}",
        primary.segment(),
        secondary.plural()
    )
}

pub fn plant_symbol(plantlist: PlantlistId, plant: PlantId) -> String {
    format!("/plantlists/{plantlist}/plant/{plant}/symbol/add")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_paths_put_column_in_x() {
        let coord = CellCoord::new(2, 5);
        assert_eq!(
            add_cell_symbol(PlotId(1), coord, PlantlistEntryId(42)),
            "/plots/1/add/symbol/42/x/5/y/2"
        );
        assert_eq!(
            delete_cell_symbol(PlotId(1), coord),
            "/plots/1/delete/cell/x/5/y/2"
        );
    }

    #[test]
    fn query_paths() {
        assert_eq!(plot_cells(PlotId(3)), "/query/plot_cells/3");
        assert_eq!(plantlist_entries(PlantlistId(4)), "/query/plantlist/4");
        assert_eq!(
            connections(EntityKind::Project, 8, EntityKind::Plantlist),
            "/query/project/8/plantlists"
        );
        assert_eq!(
            plant_symbol(PlantlistId(2), PlantId(17)),
            "/plantlists/2/plant/17/symbol/add"
        );
    }
}
