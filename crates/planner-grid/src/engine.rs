//! Symbol assignment for one plot design session.
//!
//! Painting happens in two phases. [`PlotDesign::apply_symbol`] and
//! [`PlotDesign::remove_selected_symbols`] snapshot the selection, update the
//! grid optimistically and return a [`PendingBatch`] that owns one request
//! per affected cell. [`PendingBatch::dispatch`] then sends the requests
//! concurrently. The batch borrows nothing from the design, so the user can
//! keep editing while it is in flight.
//!
//! Local state is never rolled back. A failed request is reported in the
//! [`BatchReport`]; [`PlotDesign::refresh`] is the only way to reconcile with
//! the backend.

use std::fmt;

use futures_util::future::join_all;
use planner_model::{
    Assignment, CellCoord, GridDims, PlantlistEntryId, PlantlistId, PlotId, SymbolGlyph,
};
use tracing::Instrument;

use crate::api::{CellSymbol, PersistenceApi};
use crate::error::{DesignError, RequestError, Result};
use crate::grid::Grid;
use crate::palette::SymbolPalette;
use crate::render::Renderer;
use crate::selection::{SelectionDelta, SelectionSet, ToggleMode};

/// One backend write produced by a paint or erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRequest {
    Add {
        coord: CellCoord,
        entry_id: PlantlistEntryId,
    },
    Delete {
        coord: CellCoord,
    },
    /// Delete then add on one cell. The add is only sent once the delete
    /// succeeded.
    Replace {
        coord: CellCoord,
        entry_id: PlantlistEntryId,
    },
}

impl CellRequest {
    pub fn coord(&self) -> CellCoord {
        match self {
            Self::Add { coord, .. } | Self::Delete { coord } | Self::Replace { coord, .. } => {
                *coord
            }
        }
    }

    async fn send<A: PersistenceApi>(self, api: &A, plot: PlotId) -> Result<(), RequestError> {
        match self {
            Self::Add { coord, entry_id } => api.add_cell_symbol(plot, coord, entry_id).await,
            Self::Delete { coord } => api.delete_cell_symbol(plot, coord).await,
            Self::Replace { coord, entry_id } => {
                api.delete_cell_symbol(plot, coord).await?;
                api.add_cell_symbol(plot, coord, entry_id).await
            }
        }
    }
}

impl fmt::Display for CellRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { coord, entry_id } => write!(f, "add entry {entry_id} at {coord}"),
            Self::Delete { coord } => write!(f, "delete {coord}"),
            Self::Replace { coord, entry_id } => write!(f, "replace {coord} with entry {entry_id}"),
        }
    }
}

/// A request that the backend did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFailure {
    pub request: CellRequest,
    pub error: RequestError,
}

/// Per-cell outcome of a dispatched batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<CellCoord>,
    pub failed: Vec<CellFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Coordinates whose request failed, in batch order.
    pub fn failed_coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.failed.iter().map(|failure| failure.request.coord())
    }
}

/// Requests produced by one paint or erase, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a batch does nothing until it is dispatched"]
pub struct PendingBatch {
    plot_id: PlotId,
    requests: Vec<CellRequest>,
}

impl PendingBatch {
    pub fn plot_id(&self) -> PlotId {
        self.plot_id
    }

    pub fn requests(&self) -> &[CellRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Send every request at once and wait for all of them.
    ///
    /// Requests are independent: one failing does not stop the others, and
    /// nothing is retried.
    pub async fn dispatch<A: PersistenceApi>(self, api: &A) -> BatchReport {
        let plot = self.plot_id;
        let span = tracing::info_span!("dispatch", %plot, requests = self.requests.len());

        let outcomes = join_all(
            self.requests
                .iter()
                .copied()
                .map(|request| async move { (request, request.send(api, plot).await) }),
        )
        .instrument(span.clone())
        .await;

        let _guard = span.enter();
        let mut report = BatchReport::default();
        for (request, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    tracing::debug!("{request}: ok");
                    report.succeeded.push(request.coord());
                }
                Err(error) => {
                    tracing::warn!("{request} failed: {error}");
                    report.failed.push(CellFailure { request, error });
                }
            }
        }
        tracing::info!(
            "Plot {plot}: {} of {} cell requests succeeded",
            report.succeeded.len(),
            report.total()
        );
        report
    }
}

/// Grid, selection and renderer for the plot being designed.
#[derive(Debug)]
pub struct PlotDesign<R: Renderer> {
    plot_id: PlotId,
    grid: Grid,
    selection: SelectionSet,
    renderer: R,
}

impl<R: Renderer> PlotDesign<R> {
    /// An empty design. Call [`refresh`](Self::refresh) to load the plot's
    /// current cells.
    pub fn new(plot_id: PlotId, dims: GridDims, renderer: R) -> Self {
        Self {
            plot_id,
            grid: Grid::new(dims),
            selection: SelectionSet::new(dims),
            renderer,
        }
    }

    pub fn plot_id(&self) -> PlotId {
        self.plot_id
    }

    pub fn dims(&self) -> GridDims {
        self.grid.dims()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn toggle_cell(&mut self, coord: CellCoord) -> Result<()> {
        let delta = self.selection.toggle_cell(coord)?;
        self.publish(&delta);
        Ok(())
    }

    /// Toggle a row header and return the mode the row was in.
    pub fn toggle_row(&mut self, row: u32) -> Result<ToggleMode> {
        let mode = self.selection.row_mode(row)?;
        let delta = self.selection.toggle_row(row)?;
        self.publish(&delta);
        Ok(mode)
    }

    /// Toggle a column header and return the mode the column was in.
    pub fn toggle_col(&mut self, col: u32) -> Result<ToggleMode> {
        let mode = self.selection.col_mode(col)?;
        let delta = self.selection.toggle_col(col)?;
        self.publish(&delta);
        Ok(mode)
    }

    pub fn select_all(&mut self) {
        let delta = self.selection.select_all();
        self.publish(&delta);
    }

    pub fn deselect_all(&mut self) {
        let delta = self.selection.deselect_all();
        self.publish(&delta);
    }

    /// Paint `glyph` on every selected cell.
    ///
    /// The grid and renderer are updated before this returns. The returned
    /// batch holds one request per selected cell: an add for empty cells and
    /// a replace for occupied ones, even when they already showed the same
    /// symbol.
    pub fn apply_symbol(&mut self, glyph: &SymbolGlyph, entry_id: PlantlistEntryId) -> PendingBatch {
        let targets: Vec<CellCoord> = self.selection.members().collect();
        let mut requests = Vec::with_capacity(targets.len());

        for coord in targets {
            let assignment = Assignment::new(entry_id, glyph.clone());
            match self.grid.set_assignment(coord, assignment) {
                Ok(previous) => {
                    if previous.as_ref() != self.grid.get(coord).ok().flatten() {
                        self.notify_cell(coord);
                    }
                    requests.push(match previous {
                        Some(_) => CellRequest::Replace { coord, entry_id },
                        None => CellRequest::Add { coord, entry_id },
                    });
                }
                Err(e) => tracing::warn!("Skipping {coord}: {e}"),
            }
        }

        tracing::debug!(
            "Painted {} on {} cells of plot {}",
            glyph,
            requests.len(),
            self.plot_id
        );
        self.batch(requests)
    }

    /// Clear every selected cell that holds a symbol.
    ///
    /// Empty selected cells are left alone and produce no request.
    pub fn remove_selected_symbols(&mut self) -> PendingBatch {
        let targets: Vec<CellCoord> = self
            .selection
            .members()
            .filter(|coord| self.grid.is_assigned(*coord))
            .collect();
        let mut requests = Vec::with_capacity(targets.len());

        for coord in targets {
            match self.grid.clear_assignment(coord) {
                Ok(_) => {
                    self.renderer.cell_changed(coord, None);
                    requests.push(CellRequest::Delete { coord });
                }
                Err(e) => tracing::warn!("Skipping {coord}: {e}"),
            }
        }

        tracing::debug!(
            "Cleared {} cells of plot {}",
            requests.len(),
            self.plot_id
        );
        self.batch(requests)
    }

    /// [`apply_symbol`](Self::apply_symbol) and dispatch in one step.
    pub async fn apply_symbol_now<A: PersistenceApi>(
        &mut self,
        api: &A,
        glyph: &SymbolGlyph,
        entry_id: PlantlistEntryId,
    ) -> BatchReport {
        self.apply_symbol(glyph, entry_id).dispatch(api).await
    }

    /// [`remove_selected_symbols`](Self::remove_selected_symbols) and
    /// dispatch in one step.
    pub async fn remove_selected_now<A: PersistenceApi>(&mut self, api: &A) -> BatchReport {
        self.remove_selected_symbols().dispatch(api).await
    }

    /// Replace the grid with a snapshot and reset the selection.
    ///
    /// Returns how many cells changed. On error neither the grid nor the
    /// selection is touched.
    pub fn load_snapshot(&mut self, cells: impl IntoIterator<Item = CellSymbol>) -> Result<usize> {
        let changed = self.grid.load(
            cells
                .into_iter()
                .map(CellSymbol::into_assignment)
                .map(|(coord, assignment)| (coord, Some(assignment))),
        )?;
        for coord in &changed {
            self.notify_cell(*coord);
        }
        self.deselect_all();
        Ok(changed.len())
    }

    /// Fetch the plot's cells from the backend and load them.
    pub async fn refresh<A: PersistenceApi>(&mut self, api: &A) -> Result<usize, DesignError> {
        let cells = api.fetch_plot_cell_symbols(self.plot_id).await?;
        let count = cells.len();
        let changed = self.load_snapshot(cells)?;
        tracing::info!(
            "Loaded {count} symbols for plot {} ({changed} cells changed)",
            self.plot_id
        );
        Ok(changed)
    }

    /// The symbols a plant list offers for painting.
    pub async fn palette<A: PersistenceApi>(
        &self,
        api: &A,
        plantlist: PlantlistId,
    ) -> Result<SymbolPalette, RequestError> {
        let entries = api.fetch_plantlist_assignable_entries(plantlist).await?;
        tracing::debug!("Plant list {plantlist} offers {} entries", entries.len());
        Ok(SymbolPalette::new(entries))
    }

    fn batch(&self, requests: Vec<CellRequest>) -> PendingBatch {
        PendingBatch {
            plot_id: self.plot_id,
            requests,
        }
    }

    fn publish(&mut self, delta: &SelectionDelta) {
        if !delta.is_empty() {
            self.renderer
                .selection_changed(&delta.added, &delta.removed);
        }
    }

    fn notify_cell(&mut self, coord: CellCoord) {
        let assignment = self.grid.get(coord).ok().flatten();
        self.renderer.cell_changed(coord, assignment);
    }
}
