//! Observation hooks for the draw lifecycle.
//!
//! A [`Visitor`] receives callbacks as surfaces and nodes progress through
//! their draw passes. Hooks observe only: they return nothing and must not
//! fail. Implementations override the hooks they care about; the rest
//! default to no-ops.

use crate::{
    event::PassEvent,
    id::{NodeId, SurfaceId},
};

/// Draw-lifecycle observer.
///
/// A hook may be invoked with an id the visitor has never seen;
/// implementations lazily initialize any per-entity bookkeeping rather
/// than treating that as an error.
pub trait Visitor {
    /// A surface began a draw pass.
    fn on_surface_draw_start(&mut self, _surface: SurfaceId) {}

    /// A surface finished its draw pass.
    fn on_surface_draw_end(&mut self, _surface: SurfaceId) {}

    /// A surface's draw pass ended without drawing.
    fn on_surface_draw_skipped(&mut self, _surface: SurfaceId) {}

    /// A node began its draw pass.
    fn on_node_draw_start(&mut self, _node: NodeId) {}

    /// A node synchronized its dependencies.
    fn on_node_sync_deps(&mut self, _node: NodeId) {}

    /// A node issued its draw.
    fn on_node_draw(&mut self, _node: NodeId) {}

    /// A node finished its draw pass.
    fn on_node_draw_end(&mut self, _node: NodeId) {}

    /// A node's draw pass ended without drawing.
    fn on_node_draw_skipped(&mut self, _node: NodeId) {}
}

/// Ordered collection of visitors sharing one event stream.
///
/// `Visitors` implements [`Visitor`] itself, forwarding every hook to each
/// registered visitor in registration order.
#[derive(Default)]
pub struct Visitors {
    visitors: Vec<Box<dyn Visitor + Send>>,
}

impl Visitors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `visitor` at the end of the broadcast order.
    pub fn add(&mut self, visitor: impl Visitor + Send + 'static) {
        self.visitors.push(Box::new(visitor));
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Drops every registered visitor.
    pub fn clear(&mut self) {
        self.visitors.clear();
    }
}

impl Visitor for Visitors {
    fn on_surface_draw_start(&mut self, surface: SurfaceId) {
        for visitor in &mut self.visitors {
            visitor.on_surface_draw_start(surface);
        }
    }

    fn on_surface_draw_end(&mut self, surface: SurfaceId) {
        for visitor in &mut self.visitors {
            visitor.on_surface_draw_end(surface);
        }
    }

    fn on_surface_draw_skipped(&mut self, surface: SurfaceId) {
        for visitor in &mut self.visitors {
            visitor.on_surface_draw_skipped(surface);
        }
    }

    fn on_node_draw_start(&mut self, node: NodeId) {
        for visitor in &mut self.visitors {
            visitor.on_node_draw_start(node);
        }
    }

    fn on_node_sync_deps(&mut self, node: NodeId) {
        for visitor in &mut self.visitors {
            visitor.on_node_sync_deps(node);
        }
    }

    fn on_node_draw(&mut self, node: NodeId) {
        for visitor in &mut self.visitors {
            visitor.on_node_draw(node);
        }
    }

    fn on_node_draw_end(&mut self, node: NodeId) {
        for visitor in &mut self.visitors {
            visitor.on_node_draw_end(node);
        }
    }

    fn on_node_draw_skipped(&mut self, node: NodeId) {
        for visitor in &mut self.visitors {
            visitor.on_node_draw_skipped(node);
        }
    }
}

/// Visitor that logs every lifecycle event at `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceVisitor;

impl TraceVisitor {
    fn log(&self, event: PassEvent) {
        if let Some(surface) = event.surface_id() {
            tracing::trace!(event = event.name(), surface = surface.get());
        } else if let Some(node) = event.node_id() {
            tracing::trace!(event = event.name(), node = node.get());
        }
    }
}

impl Visitor for TraceVisitor {
    fn on_surface_draw_start(&mut self, surface: SurfaceId) {
        self.log(PassEvent::SurfaceDrawStart(surface));
    }

    fn on_surface_draw_end(&mut self, surface: SurfaceId) {
        self.log(PassEvent::SurfaceDrawEnd(surface));
    }

    fn on_surface_draw_skipped(&mut self, surface: SurfaceId) {
        self.log(PassEvent::SurfaceDrawSkipped(surface));
    }

    fn on_node_draw_start(&mut self, node: NodeId) {
        self.log(PassEvent::NodeDrawStart(node));
    }

    fn on_node_sync_deps(&mut self, node: NodeId) {
        self.log(PassEvent::NodeSyncDeps(node));
    }

    fn on_node_draw(&mut self, node: NodeId) {
        self.log(PassEvent::NodeDraw(node));
    }

    fn on_node_draw_end(&mut self, node: NodeId) {
        self.log(PassEvent::NodeDrawEnd(node));
    }

    fn on_node_draw_skipped(&mut self, node: NodeId) {
        self.log(PassEvent::NodeDrawSkipped(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Tagged {
        tag: u8,
        seen: Arc<Mutex<Vec<u8>>>,
    }

    impl Visitor for Tagged {
        fn on_surface_draw_start(&mut self, _surface: SurfaceId) {
            self.seen.lock().unwrap().push(self.tag);
        }
    }

    #[test]
    fn broadcast_follows_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut visitors = Visitors::new();
        for tag in [1, 2, 3] {
            visitors.add(Tagged {
                tag,
                seen: Arc::clone(&seen),
            });
        }
        assert_eq!(visitors.len(), 3);

        let surface = SurfaceId::next();
        visitors.on_surface_draw_start(surface);
        visitors.on_surface_draw_start(surface);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn default_hooks_are_no_ops() {
        struct Inert;
        impl Visitor for Inert {}

        let mut inert = Inert;
        inert.on_surface_draw_start(SurfaceId::next());
        inert.on_node_draw_skipped(NodeId::next());
    }

    #[test]
    fn clear_drops_visitors() {
        let mut visitors = Visitors::new();
        visitors.add(TraceVisitor);
        assert!(!visitors.is_empty());
        visitors.clear();
        assert!(visitors.is_empty());
    }
}
