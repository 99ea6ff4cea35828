//! Lifecycle events as values.

use crate::id::{NodeId, SurfaceId};

/// One draw-lifecycle event, tagged with the entity it concerns.
///
/// The hooks on [`Visitor`](crate::visitor::Visitor) mirror these variants
/// one to one; the enum form exists for recording and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassEvent {
    SurfaceDrawStart(SurfaceId),
    SurfaceDrawEnd(SurfaceId),
    SurfaceDrawSkipped(SurfaceId),
    NodeDrawStart(NodeId),
    NodeSyncDeps(NodeId),
    NodeDraw(NodeId),
    NodeDrawEnd(NodeId),
    NodeDrawSkipped(NodeId),
}

impl PassEvent {
    /// The surface this event concerns, if it is a surface event.
    pub fn surface_id(&self) -> Option<SurfaceId> {
        match self {
            Self::SurfaceDrawStart(id) | Self::SurfaceDrawEnd(id) | Self::SurfaceDrawSkipped(id) => {
                Some(*id)
            }
            _ => None,
        }
    }

    /// The node this event concerns, if it is a node event.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::NodeDrawStart(id)
            | Self::NodeSyncDeps(id)
            | Self::NodeDraw(id)
            | Self::NodeDrawEnd(id)
            | Self::NodeDrawSkipped(id) => Some(*id),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SurfaceDrawStart(_) => "surface_draw_start",
            Self::SurfaceDrawEnd(_) => "surface_draw_end",
            Self::SurfaceDrawSkipped(_) => "surface_draw_skipped",
            Self::NodeDrawStart(_) => "node_draw_start",
            Self::NodeSyncDeps(_) => "node_sync_deps",
            Self::NodeDraw(_) => "node_draw",
            Self::NodeDrawEnd(_) => "node_draw_end",
            Self::NodeDrawSkipped(_) => "node_draw_skipped",
        }
    }
}
