//! GPU texture handle that can be real or mock.

use wgpu;

/// Owned 2D texture handle.
///
/// Hides whether it wraps a real `wgpu::Texture` or a mock stand-in, so
/// loader code and tests hold the same type. Clone is cheap (the real
/// variant is refcounted inside wgpu).
#[derive(Clone, Debug)]
pub struct Texture2d {
    inner: TextureInner,
}

#[derive(Clone, Debug)]
enum TextureInner {
    Real(wgpu::Texture),
    #[cfg(feature = "mock")]
    Mock {
        id: u64,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    },
}

impl Texture2d {
    /// Wraps a real WGPU texture.
    pub fn from_wgpu(texture: wgpu::Texture) -> Self {
        Self {
            inner: TextureInner::Real(texture),
        }
    }

    /// Creates a mock texture (for testing).
    #[cfg(feature = "mock")]
    pub fn mock(id: u64, width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        Self {
            inner: TextureInner::Mock {
                id,
                width,
                height,
                format,
            },
        }
    }

    /// Get the underlying `wgpu::Texture` (if real).
    ///
    /// # Panics
    /// Panics if this is a mock texture.
    pub fn as_wgpu(&self) -> &wgpu::Texture {
        match &self.inner {
            TextureInner::Real(texture) => texture,
            #[cfg(feature = "mock")]
            TextureInner::Mock { .. } => {
                panic!("attempted to get wgpu::Texture from a mock texture")
            }
        }
    }

    /// Check if this is a mock (useful in tests).
    #[cfg(feature = "mock")]
    pub fn is_mock(&self) -> bool {
        matches!(self.inner, TextureInner::Mock { .. })
    }

    /// Get the mock id (for test assertions).
    #[cfg(feature = "mock")]
    pub fn mock_id(&self) -> Option<u64> {
        match &self.inner {
            TextureInner::Mock { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn width(&self) -> u32 {
        match &self.inner {
            TextureInner::Real(texture) => texture.width(),
            #[cfg(feature = "mock")]
            TextureInner::Mock { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match &self.inner {
            TextureInner::Real(texture) => texture.height(),
            #[cfg(feature = "mock")]
            TextureInner::Mock { height, .. } => *height,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        match &self.inner {
            TextureInner::Real(texture) => texture.format(),
            #[cfg(feature = "mock")]
            TextureInner::Mock { format, .. } => *format,
        }
    }
}
