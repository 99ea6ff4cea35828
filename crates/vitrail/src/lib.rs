//! Vitrail - observable GPU draw passes
//!
//! Vitrail instruments surface and node draw passes and resolves textures
//! through pluggable loaders. It provides:
//!
//! - **Draw Lifecycle**: RAII surface and node passes broadcasting events
//!   to registered visitors
//! - **Texture Loading**: An ordered loader registry routing type-erased
//!   inputs to lazily-built loader pools
//! - **Deferred Resolution**: Cloneable futures over slot-managed texture
//!   state, memoized per input
//! - **Pixel Buffers**: Shared RGBA8 buffers with identity-based texture
//!   reuse
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use vitrail::prelude::*;
//!
//! fn frame(visitors: &mut Visitors, context: Arc<dyn RenderContext>) {
//!     let mut loaders = TextureLoaders::new();
//!     loaders.register("pixels", |context| Box::new(PixelsLoader::new(context)));
//!     let mut pool = LoaderPool::new(context);
//!
//!     let buffer = PixelBuffer::solid(2, 2, Rgba8::new(255, 0, 0, 255));
//!     let load = pool.load(&loaders, &buffer);
//!
//!     let mut pass = visitors.begin_surface(SurfaceId::next());
//!     let mut node_pass = pass.begin_node(NodeId::next());
//!     node_pass.sync_deps();
//!     if load.wait().is_ok() {
//!         node_pass.draw();
//!     }
//!     node_pass.finish();
//!     pass.finish();
//! }
//! ```

// Re-export core types
pub use vitrail_core as core;

// Re-export sub-crates based on features
#[cfg(feature = "pipeline")]
pub use vitrail_pipeline as pipeline;
#[cfg(feature = "pipeline")]
pub use vitrail_pipeline::{
    NodeId, NodePass, PassEvent, SurfaceId, SurfacePass, TraceVisitor, Visitor, Visitors,
};

#[cfg(feature = "textures")]
pub use vitrail_textures as textures;
#[cfg(feature = "textures")]
pub use vitrail_textures::{
    LoadError, LoaderPool, PixelBuffer, PixelsLoader, RenderContext, ResolvePhase, Rgba8,
    Texture2d, TextureLoad, TextureLoader, TextureLoaders, WgpuContext,
};

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "pipeline")]
    pub use vitrail_pipeline::{
        NodeId, NodePass, PassEvent, SurfaceId, SurfacePass, TraceVisitor, Visitor, Visitors,
    };

    #[cfg(feature = "textures")]
    pub use vitrail_textures::{
        LoadError, LoaderPool, PixelBuffer, PixelsLoader, RenderContext, ResolvePhase, Rgba8,
        Texture2d, TextureLoad, TextureLoader, TextureLoaders,
    };
}
