//! RAII guards that emit lifecycle events in their only legal orders.
//!
//! A surface pass brackets the node passes it contains. Dropping a guard
//! emits the matching end event unless the pass was skipped, and a node
//! pass mutably reborrows its surface pass, so sequences stay strictly
//! nested. That nesting is the ordering contract observers rely on.

use crate::{
    id::{NodeId, SurfaceId},
    visitor::{Visitor, Visitors},
};

/// In-progress surface draw pass.
///
/// [`begin`](Self::begin) fires `on_surface_draw_start`. Dropping the guard
/// (or calling [`finish`](Self::finish)) fires `on_surface_draw_end`;
/// [`skip`](Self::skip) fires `on_surface_draw_skipped` instead.
pub struct SurfacePass<'v, V: Visitor + ?Sized> {
    visitor: &'v mut V,
    surface: SurfaceId,
    skipped: bool,
}

impl<'v, V: Visitor + ?Sized> SurfacePass<'v, V> {
    /// Starts a surface pass, firing `on_surface_draw_start`.
    pub fn begin(visitor: &'v mut V, surface: SurfaceId) -> Self {
        visitor.on_surface_draw_start(surface);
        Self {
            visitor,
            surface,
            skipped: false,
        }
    }

    /// The surface being drawn.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Starts a node pass nested in this surface pass.
    pub fn begin_node(&mut self, node: NodeId) -> NodePass<'_, V> {
        NodePass::begin(self.visitor, node)
    }

    /// Ends the pass without drawing, firing `on_surface_draw_skipped`
    /// instead of the end event.
    pub fn skip(mut self) {
        self.skipped = true;
        self.visitor.on_surface_draw_skipped(self.surface);
    }

    /// Ends the pass, firing `on_surface_draw_end`. Equivalent to dropping
    /// the guard.
    pub fn finish(self) {}
}

impl<V: Visitor + ?Sized> Drop for SurfacePass<'_, V> {
    fn drop(&mut self) {
        if !self.skipped {
            self.visitor.on_surface_draw_end(self.surface);
        }
    }
}

/// In-progress node draw pass.
///
/// [`begin`](Self::begin) fires `on_node_draw_start`. Between start and
/// end the host reports [`sync_deps`](Self::sync_deps) and
/// [`draw`](Self::draw); dropping the guard fires `on_node_draw_end`,
/// while [`skip`](Self::skip) fires `on_node_draw_skipped` instead.
pub struct NodePass<'v, V: Visitor + ?Sized> {
    visitor: &'v mut V,
    node: NodeId,
    drawn: bool,
    skipped: bool,
}

impl<'v, V: Visitor + ?Sized> NodePass<'v, V> {
    /// Starts a node pass, firing `on_node_draw_start`.
    pub fn begin(visitor: &'v mut V, node: NodeId) -> Self {
        visitor.on_node_draw_start(node);
        Self {
            visitor,
            node,
            drawn: false,
            skipped: false,
        }
    }

    /// The node being drawn.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Reports dependency synchronization, firing `on_node_sync_deps`.
    /// May fire any number of times before [`draw`](Self::draw).
    pub fn sync_deps(&mut self) {
        self.visitor.on_node_sync_deps(self.node);
    }

    /// Reports the draw itself, firing `on_node_draw`.
    pub fn draw(&mut self) {
        self.drawn = true;
        self.visitor.on_node_draw(self.node);
    }

    /// Ends the pass without drawing, firing `on_node_draw_skipped`
    /// instead of the end event.
    pub fn skip(mut self) {
        debug_assert!(!self.drawn, "node pass skipped after it reported a draw");
        self.skipped = true;
        self.visitor.on_node_draw_skipped(self.node);
    }

    /// Ends the pass, firing `on_node_draw_end`. Equivalent to dropping the
    /// guard.
    pub fn finish(self) {}
}

impl<V: Visitor + ?Sized> Drop for NodePass<'_, V> {
    fn drop(&mut self) {
        if !self.skipped {
            self.visitor.on_node_draw_end(self.node);
        }
    }
}

impl Visitors {
    /// Starts a surface pass broadcast to every registered visitor.
    pub fn begin_surface(&mut self, surface: SurfaceId) -> SurfacePass<'_, Visitors> {
        SurfacePass::begin(self, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PassEvent;

    #[derive(Default)]
    struct Log(Vec<PassEvent>);

    impl Visitor for Log {
        fn on_surface_draw_start(&mut self, s: SurfaceId) {
            self.0.push(PassEvent::SurfaceDrawStart(s));
        }
        fn on_surface_draw_end(&mut self, s: SurfaceId) {
            self.0.push(PassEvent::SurfaceDrawEnd(s));
        }
        fn on_surface_draw_skipped(&mut self, s: SurfaceId) {
            self.0.push(PassEvent::SurfaceDrawSkipped(s));
        }
        fn on_node_draw_start(&mut self, n: NodeId) {
            self.0.push(PassEvent::NodeDrawStart(n));
        }
        fn on_node_sync_deps(&mut self, n: NodeId) {
            self.0.push(PassEvent::NodeSyncDeps(n));
        }
        fn on_node_draw(&mut self, n: NodeId) {
            self.0.push(PassEvent::NodeDraw(n));
        }
        fn on_node_draw_end(&mut self, n: NodeId) {
            self.0.push(PassEvent::NodeDrawEnd(n));
        }
        fn on_node_draw_skipped(&mut self, n: NodeId) {
            self.0.push(PassEvent::NodeDrawSkipped(n));
        }
    }

    #[test]
    fn full_pass_emits_in_order() {
        let mut log = Log::default();
        let surface = SurfaceId::next();
        let node = NodeId::next();

        let mut pass = SurfacePass::begin(&mut log, surface);
        let mut node_pass = pass.begin_node(node);
        node_pass.sync_deps();
        node_pass.draw();
        node_pass.finish();
        pass.finish();

        assert_eq!(
            log.0,
            vec![
                PassEvent::SurfaceDrawStart(surface),
                PassEvent::NodeDrawStart(node),
                PassEvent::NodeSyncDeps(node),
                PassEvent::NodeDraw(node),
                PassEvent::NodeDrawEnd(node),
                PassEvent::SurfaceDrawEnd(surface),
            ]
        );
    }

    #[test]
    fn skip_replaces_the_end_event() {
        let mut log = Log::default();
        let surface = SurfaceId::next();
        let node = NodeId::next();

        let mut pass = SurfacePass::begin(&mut log, surface);
        pass.begin_node(node).skip();
        pass.skip();

        assert_eq!(
            log.0,
            vec![
                PassEvent::SurfaceDrawStart(surface),
                PassEvent::NodeDrawStart(node),
                PassEvent::NodeDrawSkipped(node),
                PassEvent::SurfaceDrawSkipped(surface),
            ]
        );
    }

    #[test]
    fn dropping_a_guard_fires_end() {
        let mut log = Log::default();
        let surface = SurfaceId::next();
        {
            let _pass = SurfacePass::begin(&mut log, surface);
        }
        assert_eq!(
            log.0,
            vec![
                PassEvent::SurfaceDrawStart(surface),
                PassEvent::SurfaceDrawEnd(surface),
            ]
        );
    }

    #[test]
    fn sync_deps_may_repeat() {
        let mut log = Log::default();
        let node = NodeId::next();
        {
            let mut node_pass = NodePass::begin(&mut log, node);
            node_pass.sync_deps();
            node_pass.sync_deps();
            node_pass.draw();
        }
        assert_eq!(
            log.0,
            vec![
                PassEvent::NodeDrawStart(node),
                PassEvent::NodeSyncDeps(node),
                PassEvent::NodeSyncDeps(node),
                PassEvent::NodeDraw(node),
                PassEvent::NodeDrawEnd(node),
            ]
        );
    }
}
