//! Decoded-image stand-in whose pixel data may be unavailable.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use vitrail_core::collections::HashMap;
use vitrail_textures::{
    LoadError, PixelBuffer, RenderContext, ResolutionSlot, Texture2d, TextureInput, TextureLoad,
    TextureLoader,
};

static NEXT_FAKE_ID: AtomicU64 = AtomicU64::new(1);

type PixelSource = Arc<dyn Fn() -> Option<PixelBuffer> + Send + Sync>;

/// Stand-in for a decoded image.
///
/// The pixel source is consulted each time a load begins; returning `None`
/// makes that load fail with [`LoadError::MissingPixels`], which models an
/// image whose data has not arrived yet. Clones share identity, so loads of
/// a clone join the original's resolution.
#[derive(Clone)]
pub struct FakeTexture {
    id: u64,
    width: u32,
    height: u32,
    source: PixelSource,
}

impl FakeTexture {
    pub fn new(
        width: u32,
        height: u32,
        source: impl Fn() -> Option<PixelBuffer> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: NEXT_FAKE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            source: Arc::new(source),
        }
    }

    /// A fake that always yields `pixels`.
    pub fn from_pixels(pixels: PixelBuffer) -> Self {
        let (width, height) = (pixels.width(), pixels.height());
        Self::new(width, height, move || Some(pixels.clone()))
    }

    /// A fake whose loads see `feeds` in order, then nothing.
    ///
    /// `None` entries make a load fail with [`LoadError::MissingPixels`];
    /// a later `Some` entry lets the retry succeed.
    pub fn sequence(width: u32, height: u32, feeds: Vec<Option<PixelBuffer>>) -> Self {
        let feeds = Mutex::new(feeds.into_iter());
        Self::new(width, height, move || feeds.lock().next().flatten())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current pixel data, if the fake has any to give.
    pub fn pixels(&self) -> Option<PixelBuffer> {
        (self.source)()
    }
}

impl fmt::Debug for FakeTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTexture")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Loads [`FakeTexture`] inputs, keyed by fake identity.
pub struct FakeTextureLoader {
    context: Arc<dyn RenderContext>,
    slots: HashMap<u64, Arc<Mutex<ResolutionSlot>>>,
}

impl FakeTextureLoader {
    pub fn new(context: Arc<dyn RenderContext>) -> Self {
        Self {
            context,
            slots: HashMap::new(),
        }
    }
}

impl TextureLoader for FakeTextureLoader {
    fn can_load(&self, input: &TextureInput) -> bool {
        input.downcast_ref::<FakeTexture>().is_some()
    }

    fn get(&self, input: &TextureInput) -> Option<Texture2d> {
        let fake = input.downcast_ref::<FakeTexture>()?;
        self.slots.get(&fake.id)?.lock().get()
    }

    fn load(&mut self, input: &TextureInput) -> TextureLoad {
        let Some(fake) = input.downcast_ref::<FakeTexture>() else {
            return TextureLoad::failed(LoadError::rejected("input is not a fake texture"));
        };
        let slot = Arc::clone(
            self.slots
                .entry(fake.id)
                .or_insert_with(|| Arc::new(Mutex::new(ResolutionSlot::new()))),
        );

        let context = Arc::clone(&self.context);
        let fake = fake.clone();
        let future = slot.lock().request(move |promise| match fake.pixels() {
            Some(pixels) => {
                let texture = context.create_pixel_texture("fake-texture", &pixels);
                promise.resolve(texture);
            }
            None => {
                tracing::warn!(id = fake.id, "fake texture has no pixels");
                promise.reject(LoadError::MissingPixels);
            }
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
        tracing::debug!(released, "fake texture loader disposed");
    }
}
