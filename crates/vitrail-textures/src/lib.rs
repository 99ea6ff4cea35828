//! Vitrail Textures
//!
//! Pluggable texture resolution: loaders claim inputs by capability, a
//! per-context pool routes each input to the first loader that claims it,
//! and a small state machine tracks every input from first request to
//! disposal.

pub mod context;
pub mod error;
pub mod loader;
pub mod pixels;
pub mod registry;
pub mod resolve;
pub mod texture;

pub use context::{RenderContext, WgpuContext};
pub use error::LoadError;
pub use loader::{DisposeAction, PixelsLoader, TextureInput, TextureLoad, TextureLoader};
pub use pixels::{CHANNELS, PixelBuffer, Rgba8};
pub use registry::{LoaderFactory, LoaderPool, TextureLoaders};
pub use resolve::{ResolutionSlot, ResolvePhase, TextureFuture, TexturePromise, TextureResult};
pub use texture::Texture2d;
