//! Mock implementation of RenderContext for testing.
//!
//! Records every context operation instead of touching a device, so loader
//! behavior can be asserted without a GPU.

use parking_lot::Mutex;
use vitrail_textures::{PixelBuffer, RenderContext, Texture2d};
use wgpu::{TextureDescriptor, TextureFormat};

/// Records one context operation for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCall {
    CreateTexture {
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    WriteTexture {
        texture: Option<u64>,
        bytes: usize,
    },
    DestroyTexture {
        texture: Option<u64>,
    },
}

/// Mock [`RenderContext`] that mints mock textures and records calls.
///
/// Methods take `&self` but must record, so state lives behind a `Mutex`;
/// `parking_lot` keeps the mock `Send + Sync` as the trait requires.
pub struct MockRenderContext {
    calls: Mutex<Vec<ContextCall>>,
    next_texture_id: Mutex<u64>,
}

impl MockRenderContext {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_texture_id: Mutex::new(0),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<ContextCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn count_texture_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ContextCall::CreateTexture { .. }))
            .count()
    }

    pub fn count_texture_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ContextCall::WriteTexture { .. }))
            .count()
    }

    pub fn count_texture_destroys(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ContextCall::DestroyTexture { .. }))
            .count()
    }
}

impl Default for MockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for MockRenderContext {
    fn create_texture(&self, desc: &TextureDescriptor) -> Texture2d {
        let mut id = self.next_texture_id.lock();
        *id += 1;
        let texture_id = *id;

        self.calls.lock().push(ContextCall::CreateTexture {
            width: desc.size.width,
            height: desc.size.height,
            format: desc.format,
        });

        Texture2d::mock(texture_id, desc.size.width, desc.size.height, desc.format)
    }

    fn write_texture(&self, texture: &Texture2d, pixels: &PixelBuffer) {
        self.calls.lock().push(ContextCall::WriteTexture {
            texture: texture.mock_id(),
            bytes: pixels.byte_len(),
        });
    }

    fn destroy_texture(&self, texture: &Texture2d) {
        self.calls.lock().push(ContextCall::DestroyTexture {
            texture: texture.mock_id(),
        });
    }
}

#[cfg(test)]
mod tests {
    use vitrail_textures::Rgba8;

    use super::*;

    #[test]
    fn creates_are_mock_textures_with_fresh_ids() {
        let mock = MockRenderContext::new();
        let pixels = PixelBuffer::solid(2, 2, Rgba8::new(255, 0, 0, 255));

        let first = mock.create_pixel_texture("first", &pixels);
        let second = mock.create_pixel_texture("second", &pixels);

        assert!(first.is_mock());
        assert_ne!(first.mock_id(), second.mock_id());
        assert_eq!(mock.count_texture_creates(), 2);
        assert_eq!(mock.count_texture_writes(), 2);
    }

    #[test]
    fn writes_and_destroys_reference_the_texture() {
        let mock = MockRenderContext::new();
        let pixels = PixelBuffer::solid(1, 1, Rgba8::new(0, 0, 255, 255));

        let texture = mock.create_pixel_texture("blue", &pixels);
        mock.destroy_texture(&texture);

        let calls = mock.calls();
        assert_eq!(
            calls[1],
            ContextCall::WriteTexture {
                texture: texture.mock_id(),
                bytes: 4,
            }
        );
        assert_eq!(
            calls[2],
            ContextCall::DestroyTexture {
                texture: texture.mock_id(),
            }
        );
    }

    #[test]
    fn clear_calls_resets_the_log() {
        let mock = MockRenderContext::new();
        let pixels = PixelBuffer::solid(1, 1, Rgba8::new(0, 0, 0, 255));
        let _ = mock.create_pixel_texture("black", &pixels);

        assert_eq!(mock.call_count(), 2);
        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
