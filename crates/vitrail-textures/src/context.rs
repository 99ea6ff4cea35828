//! Trait abstracting the GPU context behind texture loading.
//!
//! Loaders never talk to `wgpu::Device` directly; they go through
//! [`RenderContext`], so the same loader code runs against the real GPU
//! and against recording mocks in tests.

use crate::{pixels::PixelBuffer, texture::Texture2d};

/// Trait abstracting texture creation, upload and release.
///
/// Methods take `&self` and return owned [`Texture2d`] handles: contexts
/// are shared via `Arc`, GPU resources are refcounted internally, and mock
/// implementations use interior mutability to record calls.
///
/// # Example
///
/// ```rust,no_run
/// use vitrail_textures::{PixelBuffer, RenderContext, Rgba8};
///
/// fn upload(ctx: &dyn RenderContext) {
///     let pixels = PixelBuffer::solid(2, 2, Rgba8::new(255, 0, 0, 255));
///     let texture = ctx.create_pixel_texture("red", &pixels);
///     // texture is owned, no lifetime issues
///     ctx.destroy_texture(&texture);
/// }
/// ```
pub trait RenderContext: Send + Sync {
    /// Create a GPU texture.
    fn create_texture(&self, desc: &wgpu::TextureDescriptor) -> Texture2d;

    /// Upload a pixel buffer into an existing texture.
    fn write_texture(&self, texture: &Texture2d, pixels: &PixelBuffer);

    /// Release a texture's GPU memory.
    fn destroy_texture(&self, texture: &Texture2d);

    /// Create an `Rgba8Unorm` texture sized to `pixels` and upload it.
    fn create_pixel_texture(&self, label: &str, pixels: &PixelBuffer) -> Texture2d {
        let texture = self.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: pixels.width(),
                height: pixels.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.write_texture(&texture, pixels);
        texture
    }
}

/// Production [`RenderContext`] over a WGPU device and queue.
#[derive(Debug, Clone)]
pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl WgpuContext {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl RenderContext for WgpuContext {
    fn create_texture(&self, desc: &wgpu::TextureDescriptor) -> Texture2d {
        let texture = self.device.create_texture(desc);
        Texture2d::from_wgpu(texture)
    }

    fn write_texture(&self, texture: &Texture2d, pixels: &PixelBuffer) {
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: texture.as_wgpu(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels.bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pixels.width() * 4),
                rows_per_image: Some(pixels.height()),
            },
            wgpu::Extent3d {
                width: pixels.width(),
                height: pixels.height(),
                depth_or_array_layers: 1,
            },
        );
    }

    fn destroy_texture(&self, texture: &Texture2d) {
        texture.as_wgpu().destroy();
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::pixels::Rgba8;

    #[derive(Default)]
    struct Probe {
        created: Mutex<Vec<(u32, u32, wgpu::TextureFormat)>>,
        writes: Mutex<Vec<usize>>,
    }

    impl RenderContext for Probe {
        fn create_texture(&self, desc: &wgpu::TextureDescriptor) -> Texture2d {
            self.created
                .lock()
                .push((desc.size.width, desc.size.height, desc.format));
            Texture2d::mock(1, desc.size.width, desc.size.height, desc.format)
        }

        fn write_texture(&self, _texture: &Texture2d, pixels: &PixelBuffer) {
            self.writes.lock().push(pixels.byte_len());
        }

        fn destroy_texture(&self, _texture: &Texture2d) {}
    }

    #[test]
    fn create_pixel_texture_composes_create_and_write() {
        let probe = Probe::default();
        let pixels = PixelBuffer::solid(3, 2, Rgba8::new(0, 255, 0, 255));

        let texture = probe.create_pixel_texture("green", &pixels);

        assert_eq!(
            probe.created.lock().as_slice(),
            &[(3, 2, wgpu::TextureFormat::Rgba8Unorm)]
        );
        assert_eq!(probe.writes.lock().as_slice(), &[24]);
        assert_eq!(texture.width(), 3);
        assert_eq!(texture.height(), 2);
    }
}
