//! Plot design scenarios against an in-memory backend.

use std::cell::RefCell;
use std::collections::HashSet;

use planner_grid::{
    AssignableEntry, CellRequest, CellSymbol, DesignError, GridError, NullRenderer,
    PersistenceApi, PlotDesign, RecordingRenderer, RenderEvent, RequestError, ToggleMode,
};
use planner_model::{
    Assignment, CellCoord, GridDims, PlantlistEntryId, PlantlistId, PlotId, SymbolGlyph,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Add(PlotId, CellCoord, PlantlistEntryId),
    Delete(PlotId, CellCoord),
    FetchCells(PlotId),
    FetchEntries(PlantlistId),
}

#[derive(Default)]
struct FakeApi {
    calls: RefCell<Vec<Call>>,
    failing: HashSet<CellCoord>,
    cells: Vec<CellSymbol>,
    entries: Vec<AssignableEntry>,
    offline: bool,
}

impl FakeApi {
    fn failing_at(coords: &[CellCoord]) -> Self {
        Self {
            failing: coords.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    fn outcome(&self, coord: CellCoord) -> Result<(), RequestError> {
        if self.failing.contains(&coord) {
            Err(RequestError::new(format!("500 for {coord}")))
        } else {
            Ok(())
        }
    }
}

impl PersistenceApi for FakeApi {
    async fn add_cell_symbol(
        &self,
        plot: PlotId,
        coord: CellCoord,
        entry: PlantlistEntryId,
    ) -> Result<(), RequestError> {
        self.calls.borrow_mut().push(Call::Add(plot, coord, entry));
        self.outcome(coord)
    }

    async fn delete_cell_symbol(&self, plot: PlotId, coord: CellCoord) -> Result<(), RequestError> {
        self.calls.borrow_mut().push(Call::Delete(plot, coord));
        self.outcome(coord)
    }

    async fn fetch_plot_cell_symbols(&self, plot: PlotId) -> Result<Vec<CellSymbol>, RequestError> {
        self.calls.borrow_mut().push(Call::FetchCells(plot));
        if self.offline {
            return Err(RequestError::retryable("connection refused"));
        }
        Ok(self.cells.clone())
    }

    async fn fetch_plantlist_assignable_entries(
        &self,
        plantlist: PlantlistId,
    ) -> Result<Vec<AssignableEntry>, RequestError> {
        self.calls.borrow_mut().push(Call::FetchEntries(plantlist));
        Ok(self.entries.clone())
    }
}

fn c(row: u32, col: u32) -> CellCoord {
    CellCoord::new(row, col)
}

fn leaf() -> SymbolGlyph {
    SymbolGlyph::new("fas fa-leaf", "#2e7d32")
}

fn design(rows: u32, cols: u32) -> PlotDesign<RecordingRenderer> {
    PlotDesign::new(PlotId(7), GridDims::new(rows, cols), RecordingRenderer::new())
}

#[test]
fn row_and_column_toggles_accumulate() {
    let mut design = design(3, 4);

    assert_eq!(design.toggle_row(1).unwrap(), ToggleMode::Add);
    assert_eq!(design.toggle_col(2).unwrap(), ToggleMode::Add);

    let members: Vec<_> = design.selection().members().collect();
    assert_eq!(
        members,
        vec![c(0, 2), c(1, 0), c(1, 1), c(1, 2), c(1, 3), c(2, 2)]
    );
    assert_eq!(
        design.renderer().events().last(),
        Some(&RenderEvent::Selection {
            added: vec![c(0, 2), c(2, 2)],
            removed: vec![],
        })
    );
}

#[tokio::test]
async fn apply_symbol_updates_grid_before_requests_resolve() {
    let api = FakeApi::default();
    let mut design = design(2, 2);
    design.toggle_cell(c(0, 0)).unwrap();
    design.toggle_cell(c(0, 1)).unwrap();

    let batch = design.apply_symbol(&leaf(), PlantlistEntryId(42));

    for coord in [c(0, 0), c(0, 1)] {
        let assignment = design.grid().get(coord).unwrap().unwrap();
        assert!(assignment.references(PlantlistEntryId(42)));
    }
    assert!(api.calls().is_empty());
    assert_eq!(design.renderer().changed_cells(), vec![c(0, 0), c(0, 1)]);

    let report = batch.dispatch(&api).await;

    assert!(report.is_success());
    assert_eq!(
        api.count(|call| matches!(call, Call::Add(PlotId(7), _, PlantlistEntryId(42)))),
        2
    );
}

#[tokio::test]
async fn repainting_a_cell_still_sends_a_request() {
    let api = FakeApi::default();
    let mut design = design(1, 2);
    design.select_all();

    design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(1)).await;
    design.renderer_mut().take();
    let report = design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(1)).await;

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(api.count(|call| matches!(call, Call::Add(..))), 4);
    assert_eq!(api.count(|call| matches!(call, Call::Delete(..))), 2);
    assert!(design.renderer().changed_cells().is_empty());
}

#[tokio::test]
async fn repainting_deletes_before_adding() {
    let api = FakeApi::default();
    let mut design = design(1, 1);
    design.select_all();
    design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(1)).await;

    let batch = design.apply_symbol(&leaf(), PlantlistEntryId(2));
    assert_eq!(
        batch.requests(),
        &[CellRequest::Replace {
            coord: c(0, 0),
            entry_id: PlantlistEntryId(2),
        }]
    );
    let report = batch.dispatch(&api).await;

    assert!(report.is_success());
    assert_eq!(
        api.calls(),
        vec![
            Call::Add(PlotId(7), c(0, 0), PlantlistEntryId(1)),
            Call::Delete(PlotId(7), c(0, 0)),
            Call::Add(PlotId(7), c(0, 0), PlantlistEntryId(2)),
        ]
    );
}

#[tokio::test]
async fn failed_delete_skips_the_add() {
    let api = FakeApi::failing_at(&[c(0, 0)]);
    let mut design = design(1, 1);
    design.select_all();
    let _unsent = design.apply_symbol(&leaf(), PlantlistEntryId(1));

    let report = design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(2)).await;

    assert_eq!(report.failed_coords().collect::<Vec<_>>(), vec![c(0, 0)]);
    assert_eq!(api.calls(), vec![Call::Delete(PlotId(7), c(0, 0))]);
}

#[tokio::test]
async fn remove_skips_empty_cells() {
    let api = FakeApi::default();
    let mut design = design(2, 2);
    design.toggle_cell(c(0, 0)).unwrap();

    let report = design.remove_selected_now(&api).await;

    assert_eq!(report.total(), 0);
    assert_eq!(api.count(|call| matches!(call, Call::Delete(..))), 0);
}

#[tokio::test]
async fn remove_clears_only_painted_selected_cells() {
    let api = FakeApi::default();
    let mut design = design(2, 2);
    design.select_all();
    design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(3)).await;
    design.deselect_all();
    design.toggle_row(0).unwrap();
    design.toggle_cell(c(1, 1)).unwrap();

    let batch = design.remove_selected_symbols();
    assert_eq!(
        batch.requests(),
        &[
            CellRequest::Delete { coord: c(0, 0) },
            CellRequest::Delete { coord: c(0, 1) },
            CellRequest::Delete { coord: c(1, 1) },
        ]
    );
    batch.dispatch(&api).await;

    assert_eq!(design.grid().assigned_count(), 1);
    assert!(design.grid().is_assigned(c(1, 0)));
}

#[tokio::test]
async fn failures_are_reported_per_cell_without_rollback() {
    let api = FakeApi::failing_at(&[c(0, 1)]);
    let mut design = design(1, 3);
    design.toggle_row(0).unwrap();

    let report = design.apply_symbol_now(&api, &leaf(), PlantlistEntryId(5)).await;

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed_coords().collect::<Vec<_>>(), vec![c(0, 1)]);
    assert_eq!(report.failed[0].error.message(), "500 for (0, 1)");
    assert!(design.grid().is_assigned(c(0, 1)));
    assert_eq!(design.grid().assigned_count(), 3);
}

#[tokio::test]
async fn batch_ignores_selection_changes_after_snapshot() {
    let api = FakeApi::default();
    let mut design = design(2, 2);
    design.toggle_cell(c(0, 0)).unwrap();
    design.toggle_cell(c(1, 1)).unwrap();

    let batch = design.apply_symbol(&leaf(), PlantlistEntryId(9));
    design.deselect_all();
    design.toggle_cell(c(1, 0)).unwrap();
    let report = batch.dispatch(&api).await;

    assert_eq!(report.succeeded, vec![c(0, 0), c(1, 1)]);
    assert!(!design.grid().is_assigned(c(1, 0)));
}

#[tokio::test]
async fn refresh_of_fresh_design_counts_occupied_cells() {
    let api = FakeApi {
        cells: vec![
            CellSymbol {
                coord: c(0, 0),
                glyph: leaf(),
                entry_id: None,
            },
            CellSymbol {
                coord: c(1, 1),
                glyph: leaf(),
                entry_id: None,
            },
        ],
        ..FakeApi::default()
    };
    let mut design = design(3, 3);

    assert_eq!(design.refresh(&api).await.unwrap(), 2);
    assert_eq!(design.grid().assigned_count(), 2);
}

#[tokio::test]
async fn refresh_replaces_grid_and_resets_selection() {
    let api = FakeApi {
        cells: vec![
            CellSymbol {
                coord: c(0, 1),
                glyph: leaf(),
                entry_id: Some(PlantlistEntryId(4)),
            },
            CellSymbol {
                coord: c(1, 0),
                glyph: SymbolGlyph::default(),
                entry_id: None,
            },
        ],
        ..FakeApi::default()
    };
    let mut design = design(2, 2);
    design.select_all();
    design.apply_symbol(&leaf(), PlantlistEntryId(1)).len();

    let changed = design.refresh(&api).await.unwrap();

    assert_eq!(changed, 4);
    assert_eq!(api.calls(), vec![Call::FetchCells(PlotId(7))]);
    assert_eq!(
        design.grid().get(c(1, 0)).unwrap(),
        Some(&Assignment::unlinked(SymbolGlyph::default()))
    );
    assert!(!design.grid().is_assigned(c(0, 0)));
    assert!(design.selection().is_empty());
    assert_eq!(design.selection().row_mode(0).unwrap(), ToggleMode::Add);
}

#[tokio::test]
async fn refresh_rejects_out_of_bounds_snapshot() {
    let api = FakeApi {
        cells: vec![CellSymbol {
            coord: c(5, 0),
            glyph: leaf(),
            entry_id: None,
        }],
        ..FakeApi::default()
    };
    let mut design = design(2, 2);

    let err = design.refresh(&api).await.unwrap_err();

    assert!(matches!(err, DesignError::Grid(GridError::Validation(_))));
    assert_eq!(design.grid().assigned_count(), 0);
}

#[tokio::test]
async fn refresh_surfaces_request_errors() {
    let api = FakeApi {
        offline: true,
        ..FakeApi::default()
    };
    let mut design = PlotDesign::new(PlotId(1), GridDims::new(1, 1), NullRenderer);

    match design.refresh(&api).await {
        Err(DesignError::Request(err)) => assert!(err.is_retryable()),
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn palette_loads_plantlist_entries() {
    let api = FakeApi {
        entries: vec![AssignableEntry {
            entry_id: PlantlistEntryId(11),
            plant_name: "Chard".to_string(),
            glyph: None,
        }],
        ..FakeApi::default()
    };
    let design = design(1, 1);

    let palette = design.palette(&api, PlantlistId(3)).await.unwrap();

    assert_eq!(palette.len(), 1);
    assert!(palette.glyph_for(PlantlistEntryId(11)).is_default());
    assert_eq!(api.calls(), vec![Call::FetchEntries(PlantlistId(3))]);
}

#[test]
fn out_of_bounds_toggles_leave_renderer_quiet() {
    let mut design = design(2, 2);
    assert!(design.toggle_cell(c(2, 2)).unwrap_err().is_bounds());
    assert!(design.toggle_row(3).is_err());
    assert!(design.renderer().events().is_empty());
}
