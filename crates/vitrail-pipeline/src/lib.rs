//! Vitrail Pipeline
//!
//! Draw-lifecycle observation for shader-graph renderers: stable surface
//! and node identities, the [`Visitor`] hook protocol, and RAII pass
//! guards that emit lifecycle events in their only legal orders.

pub mod event;
pub mod id;
pub mod pass;
pub mod visitor;

pub use event::PassEvent;
pub use id::{NodeId, SurfaceId};
pub use pass::{NodePass, SurfacePass};
pub use visitor::{TraceVisitor, Visitor, Visitors};
