//! Common resource description types.

/// Size of an image in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent3d {
    /// Create a 2D extent with depth 1.
    pub fn new_2d(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 1,
        }
    }

    /// Create a 3D extent.
    pub fn new_3d(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

impl Default for Extent3d {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            depth: 1,
        }
    }
}

/// Image format.
///
/// The discriminant values are a stable contract between the compiler and
/// backends; backends map them to `VkFormat` / `DXGI_FORMAT` equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Format {
    #[default]
    Undefined = 0,
    Rgba8Unorm = 1,
    Rgba8Srgb = 2,
    Bgra8Unorm = 3,
    Bgra8Srgb = 4,
    D32Float = 5,
}
