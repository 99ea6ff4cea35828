//! Visitor that records the exact event sequence.

use std::sync::Arc;

use parking_lot::Mutex;
use vitrail_pipeline::{NodeId, PassEvent, SurfaceId, Visitor};

/// Visitor appending every hook invocation to a shared log.
///
/// Use this when a test cares about ordering, not just counts. Clones share
/// the log.
#[derive(Debug, Default, Clone)]
pub struct RecordingVisitor {
    events: Arc<Mutex<Vec<PassEvent>>>,
}

impl RecordingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<PassEvent> {
        self.events.lock().clone()
    }

    /// Drains the log, returning what it held.
    pub fn take(&self) -> Vec<PassEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: PassEvent) {
        self.events.lock().push(event);
    }
}

impl Visitor for RecordingVisitor {
    fn on_surface_draw_start(&mut self, surface: SurfaceId) {
        self.push(PassEvent::SurfaceDrawStart(surface));
    }

    fn on_surface_draw_end(&mut self, surface: SurfaceId) {
        self.push(PassEvent::SurfaceDrawEnd(surface));
    }

    fn on_surface_draw_skipped(&mut self, surface: SurfaceId) {
        self.push(PassEvent::SurfaceDrawSkipped(surface));
    }

    fn on_node_draw_start(&mut self, node: NodeId) {
        self.push(PassEvent::NodeDrawStart(node));
    }

    fn on_node_sync_deps(&mut self, node: NodeId) {
        self.push(PassEvent::NodeSyncDeps(node));
    }

    fn on_node_draw(&mut self, node: NodeId) {
        self.push(PassEvent::NodeDraw(node));
    }

    fn on_node_draw_end(&mut self, node: NodeId) {
        self.push(PassEvent::NodeDrawEnd(node));
    }

    fn on_node_draw_skipped(&mut self, node: NodeId) {
        self.push(PassEvent::NodeDrawSkipped(node));
    }
}
