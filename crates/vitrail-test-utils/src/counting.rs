//! Visitor that counts lifecycle events.

use std::sync::Arc;

use parking_lot::Mutex;
use vitrail_core::collections::HashMap;
use vitrail_pipeline::{NodeId, SurfaceId, Visitor};

/// Totals across every surface and node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassCounters {
    pub surface_draw_start: usize,
    pub surface_draw_end: usize,
    pub surface_draw_skipped: usize,
    pub node_draw_start: usize,
    pub node_sync_deps: usize,
    pub node_draw: usize,
    pub node_draw_end: usize,
    pub node_draw_skipped: usize,
}

/// Counts for a single surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCounters {
    pub draw_start: usize,
    pub draw_end: usize,
    pub draw_skipped: usize,
}

/// Counts for a single node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounters {
    pub draw_start: usize,
    pub sync_deps: usize,
    pub draw: usize,
    pub draw_end: usize,
    pub draw_skipped: usize,
}

#[derive(Default)]
struct CountState {
    totals: PassCounters,
    surfaces: HashMap<SurfaceId, SurfaceCounters>,
    nodes: HashMap<NodeId, NodeCounters>,
}

/// Visitor counting every hook, in total and per entity.
///
/// Clones share state, so a test can keep one clone as its probe while the
/// broadcast set owns another. Counters only ever grow; entities never seen
/// read as all zeros.
#[derive(Default, Clone)]
pub struct CountingVisitor {
    state: Arc<Mutex<CountState>>,
}

impl CountingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the global totals.
    pub fn totals(&self) -> PassCounters {
        self.state.lock().totals
    }

    /// Snapshot for one surface; all zeros if it was never seen.
    pub fn surface(&self, surface: SurfaceId) -> SurfaceCounters {
        self.state
            .lock()
            .surfaces
            .get(&surface)
            .copied()
            .unwrap_or_default()
    }

    /// Snapshot for one node; all zeros if it was never seen.
    pub fn node(&self, node: NodeId) -> NodeCounters {
        self.state
            .lock()
            .nodes
            .get(&node)
            .copied()
            .unwrap_or_default()
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        *self.state.lock() = CountState::default();
    }
}

impl Visitor for CountingVisitor {
    fn on_surface_draw_start(&mut self, surface: SurfaceId) {
        let mut state = self.state.lock();
        state.totals.surface_draw_start += 1;
        state.surfaces.entry(surface).or_default().draw_start += 1;
    }

    fn on_surface_draw_end(&mut self, surface: SurfaceId) {
        let mut state = self.state.lock();
        state.totals.surface_draw_end += 1;
        state.surfaces.entry(surface).or_default().draw_end += 1;
    }

    fn on_surface_draw_skipped(&mut self, surface: SurfaceId) {
        let mut state = self.state.lock();
        state.totals.surface_draw_skipped += 1;
        state.surfaces.entry(surface).or_default().draw_skipped += 1;
    }

    fn on_node_draw_start(&mut self, node: NodeId) {
        let mut state = self.state.lock();
        state.totals.node_draw_start += 1;
        state.nodes.entry(node).or_default().draw_start += 1;
    }

    fn on_node_sync_deps(&mut self, node: NodeId) {
        let mut state = self.state.lock();
        state.totals.node_sync_deps += 1;
        state.nodes.entry(node).or_default().sync_deps += 1;
    }

    fn on_node_draw(&mut self, node: NodeId) {
        let mut state = self.state.lock();
        state.totals.node_draw += 1;
        state.nodes.entry(node).or_default().draw += 1;
    }

    fn on_node_draw_end(&mut self, node: NodeId) {
        let mut state = self.state.lock();
        state.totals.node_draw_end += 1;
        state.nodes.entry(node).or_default().draw_end += 1;
    }

    fn on_node_draw_skipped(&mut self, node: NodeId) {
        let mut state = self.state.lock();
        state.totals.node_draw_skipped += 1;
        state.nodes.entry(node).or_default().draw_skipped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_entities_read_as_zeros() {
        let probe = CountingVisitor::new();
        assert_eq!(probe.totals(), PassCounters::default());
        assert_eq!(probe.surface(SurfaceId::next()), SurfaceCounters::default());
        assert_eq!(probe.node(NodeId::next()), NodeCounters::default());
    }

    #[test]
    fn counts_accumulate_per_entity() {
        let mut probe = CountingVisitor::new();
        let first = NodeId::next();
        let second = NodeId::next();

        probe.on_node_draw_start(first);
        probe.on_node_sync_deps(first);
        probe.on_node_draw(first);
        probe.on_node_draw_end(first);
        probe.on_node_draw_start(second);
        probe.on_node_draw_skipped(second);

        assert_eq!(probe.totals().node_draw_start, 2);
        assert_eq!(probe.node(first).draw, 1);
        assert_eq!(probe.node(first).draw_skipped, 0);
        assert_eq!(probe.node(second).draw_skipped, 1);
    }

    #[test]
    fn clones_share_counts() {
        let probe = CountingVisitor::new();
        let mut writer = probe.clone();
        let surface = SurfaceId::next();

        writer.on_surface_draw_start(surface);
        writer.on_surface_draw_end(surface);

        assert_eq!(probe.surface(surface).draw_start, 1);
        assert_eq!(probe.surface(surface).draw_end, 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut probe = CountingVisitor::new();
        let surface = SurfaceId::next();
        probe.on_surface_draw_start(surface);

        probe.reset();
        assert_eq!(probe.totals(), PassCounters::default());
        assert_eq!(probe.surface(surface), SurfaceCounters::default());
    }
}
