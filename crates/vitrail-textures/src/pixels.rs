//! Immutable CPU-side pixel buffers.
//!
//! [`PixelBuffer`] is the fixture currency of the loader stack: 8-bit RGBA
//! data plus explicit shape metadata. Buffers share their bytes through an
//! `Arc`, so clones are cheap and identity (never byte equality) marks
//! "the same input" for loader memoization.

use std::{fmt, sync::Arc};

/// Channel count of every [`PixelBuffer`].
pub const CHANNELS: usize = 4;

/// One 8-bit RGBA sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Immutable 8-bit RGBA image with explicit shape metadata.
#[derive(Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl PixelBuffer {
    /// Wraps `data` as a `width` by `height` RGBA image.
    ///
    /// # Panics
    /// Panics if either dimension is zero or `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: impl Into<Arc<[u8]>>) -> Self {
        let data = data.into();
        assert!(
            width > 0 && height > 0,
            "pixel buffer dimensions must be non-zero"
        );
        let expected = width as usize * height as usize * CHANNELS;
        assert!(
            data.len() == expected,
            "pixel buffer data is {} bytes, expected {expected}",
            data.len(),
        );
        Self { width, height, data }
    }

    /// Fills a `width` by `height` buffer with one sample.
    pub fn solid(width: u32, height: u32, pixel: Rgba8) -> Self {
        Self::from_fn(width, height, |_, _| pixel)
    }

    /// Builds a buffer by sampling `f` at every coordinate, row-major.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba8) -> Self {
        assert!(
            width > 0 && height > 0,
            "pixel buffer dimensions must be non-zero"
        );
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let Rgba8 { r, g, b, a } = f(x, y);
                data.extend_from_slice(&[r, g, b, a]);
            }
        }
        Self {
            width,
            height,
            data: data.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shape as `[width, height, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.width as usize, self.height as usize, CHANNELS]
    }

    /// Total payload size in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Raw bytes, row-major RGBA.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Typed view of the samples.
    pub fn pixels(&self) -> &[Rgba8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Sample at (`x`, `y`).
    ///
    /// # Panics
    /// Panics when the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height,
        );
        self.pixels()[(y * self.width + x) as usize]
    }

    /// Whether `self` and `other` share one underlying allocation.
    ///
    /// Loaders treat shared data as "the same input": clones of one buffer
    /// resolve to one texture, while a byte-equal copy is new work.
    pub fn shares_data(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn data_key(&self) -> usize {
        self.data.as_ptr() as usize
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl Eq for PixelBuffer {}
