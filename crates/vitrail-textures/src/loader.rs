//! The texture loader seam and the built-in pixel-buffer loader.
//!
//! Loaders turn type-erased inputs into GPU textures. An input is anything
//! `Any + Send + Sync`; each loader claims the input types it understands
//! via [`TextureLoader::can_load`] and owns the resolution state for the
//! inputs it has accepted.

use std::{any::Any, fmt, sync::Arc};

use parking_lot::Mutex;
use vitrail_core::{collections::HashMap, defer::Deferred};

use crate::{
    context::RenderContext,
    error::LoadError,
    pixels::PixelBuffer,
    resolve::{ResolutionSlot, TextureFuture, TextureResult},
    texture::Texture2d,
};

/// Type-erased loader input.
///
/// Concrete inputs are recovered by downcast: raw [`PixelBuffer`]s, decoded
/// image stand-ins, symbolic test tags.
pub type TextureInput = dyn Any + Send + Sync;

/// Action releasing whatever one load acquired.
pub type DisposeAction = Arc<dyn Fn() + Send + Sync>;

/// Turns inputs of one kind into textures.
///
/// `can_load` is a pure predicate and `get` a pure read; neither touches
/// resolution state. `load` begins or joins a resolution: repeated calls for
/// the same input before settlement share one future instead of duplicating
/// the upload.
pub trait TextureLoader: Send {
    /// Whether this loader understands `input`. No side effects.
    fn can_load(&self, input: &TextureInput) -> bool;

    /// The currently resolved texture for `input`, if any.
    fn get(&self, input: &TextureInput) -> Option<Texture2d>;

    /// Begin or join resolving `input`.
    fn load(&mut self, input: &TextureInput) -> TextureLoad;

    /// Loader-level teardown releasing every managed texture.
    fn dispose(&mut self) {}
}

/// Handle to one in-flight or settled load.
///
/// Cloneable; every clone observes the same future. `dispose` releases the
/// underlying texture at most once no matter how many handles invoke it.
#[derive(Clone)]
pub struct TextureLoad {
    pub future: TextureFuture,
    dispose: DisposeAction,
}

impl TextureLoad {
    pub fn new(future: TextureFuture, dispose: DisposeAction) -> Self {
        Self { future, dispose }
    }

    /// An already-resolved load with nothing to release.
    pub fn ready(texture: Texture2d) -> Self {
        Self {
            future: Deferred::settled(Ok(texture)).future(),
            dispose: Arc::new(|| {}),
        }
    }

    /// An already-failed load with nothing to release.
    pub fn failed(error: LoadError) -> Self {
        Self {
            future: Deferred::settled(Err(error)).future(),
            dispose: Arc::new(|| {}),
        }
    }

    /// Release the texture behind this load.
    pub fn dispose(&self) {
        (self.dispose)();
    }

    /// Block until the load settles.
    pub fn wait(&self) -> TextureResult {
        futures_lite::future::block_on(self.future.clone())
    }
}

impl fmt::Debug for TextureLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureLoad")
            .field("settled", &self.future.is_settled())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(TextureLoad: Send, Sync);

/// Loads raw [`PixelBuffer`]s, memoized by buffer identity.
///
/// Two clones of one buffer share a single texture; a byte-equal copy with
/// its own allocation is new work. Identity is the data pointer, so the map
/// never inspects pixel contents.
pub struct PixelsLoader {
    context: Arc<dyn RenderContext>,
    slots: HashMap<usize, Arc<Mutex<ResolutionSlot>>>,
}

impl PixelsLoader {
    pub fn new(context: Arc<dyn RenderContext>) -> Self {
        Self {
            context,
            slots: HashMap::new(),
        }
    }
}

impl TextureLoader for PixelsLoader {
    fn can_load(&self, input: &TextureInput) -> bool {
        input.downcast_ref::<PixelBuffer>().is_some()
    }

    fn get(&self, input: &TextureInput) -> Option<Texture2d> {
        let pixels = input.downcast_ref::<PixelBuffer>()?;
        self.slots.get(&pixels.data_key())?.lock().get()
    }

    fn load(&mut self, input: &TextureInput) -> TextureLoad {
        let Some(pixels) = input.downcast_ref::<PixelBuffer>() else {
            return TextureLoad::failed(LoadError::rejected("input is not a pixel buffer"));
        };
        let slot = Arc::clone(
            self.slots
                .entry(pixels.data_key())
                .or_insert_with(|| Arc::new(Mutex::new(ResolutionSlot::new()))),
        );

        let context = Arc::clone(&self.context);
        let pixels = pixels.clone();
        let future = slot.lock().request(move |promise| {
            tracing::debug!(
                width = pixels.width(),
                height = pixels.height(),
                "uploading pixel buffer"
            );
            let texture = context.create_pixel_texture("pixel-buffer", &pixels);
            promise.resolve(texture);
        });

        let context = Arc::clone(&self.context);
        TextureLoad::new(
            future,
            Arc::new(move || {
                if let Some(texture) = slot.lock().dispose() {
                    context.destroy_texture(&texture);
                }
            }),
        )
    }

    fn dispose(&mut self) {
        let mut released = 0usize;
        for slot in self.slots.values() {
            if let Some(texture) = slot.lock().dispose() {
                self.context.destroy_texture(&texture);
                released += 1;
            }
        }
        self.slots.clear();
        tracing::debug!(released, "pixels loader disposed");
    }
}
