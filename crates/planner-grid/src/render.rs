//! Rendering seam.
//!
//! The model is the only source of truth. A [`Renderer`] is told what
//! changed and projects it onto whatever surface it owns.

use planner_model::{Assignment, CellCoord};

/// Receives change notifications from a [`PlotDesign`](crate::PlotDesign).
pub trait Renderer {
    /// One call per cell whose assignment changed.
    fn cell_changed(&mut self, coord: CellCoord, assignment: Option<&Assignment>);

    /// Called once per selection mutation that changed membership.
    fn selection_changed(&mut self, added: &[CellCoord], removed: &[CellCoord]);
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn cell_changed(&mut self, _coord: CellCoord, _assignment: Option<&Assignment>) {}

    fn selection_changed(&mut self, _added: &[CellCoord], _removed: &[CellCoord]) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn cell_changed(&mut self, coord: CellCoord, assignment: Option<&Assignment>) {
        (**self).cell_changed(coord, assignment);
    }

    fn selection_changed(&mut self, added: &[CellCoord], removed: &[CellCoord]) {
        (**self).selection_changed(added, removed);
    }
}

/// A notification captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Cell {
        coord: CellCoord,
        assignment: Option<Assignment>,
    },
    Selection {
        added: Vec<CellCoord>,
        removed: Vec<CellCoord>,
    },
}

/// Keeps every notification in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Drain the captured events.
    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Coordinates of the captured cell notifications.
    pub fn changed_cells(&self) -> Vec<CellCoord> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Cell { coord, .. } => Some(*coord),
                RenderEvent::Selection { .. } => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn cell_changed(&mut self, coord: CellCoord, assignment: Option<&Assignment>) {
        self.events.push(RenderEvent::Cell {
            coord,
            assignment: assignment.cloned(),
        });
    }

    fn selection_changed(&mut self, added: &[CellCoord], removed: &[CellCoord]) {
        self.events.push(RenderEvent::Selection {
            added: added.to_vec(),
            removed: removed.to_vec(),
        });
    }
}
