//! Testing doubles and fixtures for vitrail.
//!
//! Everything here exists so hosts can assert on draw lifecycles and
//! texture loading without a GPU:
//!
//! - [`CountingVisitor`] / [`RecordingVisitor`] - observe pass events
//! - [`MockRenderContext`] - records every context call instead of touching
//!   a device
//! - [`FakeTexture`] / [`FakeTextureLoader`] - decoded-image stand-in whose
//!   pixels may be missing
//! - [`OneTextureRig`] - a fully scripted loader for exercising registry
//!   wiring, with counters on every call
//! - [`fixtures`] - canned pixel buffers with known contents
//!
//! # Example
//!
//! ```rust
//! use vitrail_pipeline::{NodeId, SurfaceId, Visitors};
//! use vitrail_test_utils::CountingVisitor;
//!
//! let probe = CountingVisitor::new();
//! let mut visitors = Visitors::new();
//! visitors.add(probe.clone());
//!
//! let mut pass = visitors.begin_surface(SurfaceId::next());
//! let mut node = pass.begin_node(NodeId::next());
//! node.draw();
//! node.finish();
//! pass.finish();
//!
//! assert_eq!(probe.totals().node_draw, 1);
//! assert_eq!(probe.totals().surface_draw_end, 1);
//! ```

pub mod counting;
pub mod fake_texture;
pub mod fixtures;
pub mod mock_context;
pub mod one_texture;
pub mod recording;

pub use counting::{CountingVisitor, NodeCounters, PassCounters, SurfaceCounters};
pub use fake_texture::{FakeTexture, FakeTextureLoader};
pub use mock_context::{ContextCall, MockRenderContext};
pub use one_texture::{OneTextureCounters, OneTextureRig, TextureTag};
pub use recording::RecordingVisitor;
