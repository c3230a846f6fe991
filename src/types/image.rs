//! Image description types.

use bitflags::bitflags;

use super::{Extent3d, Format};

bitflags! {
    /// Usage flags for images.
    ///
    /// The bit values are a stable wire-level contract shared with backends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageUsage: u32 {
        /// Image can be copied from.
        const TRANSFER_SRC = 1 << 0;
        /// Image can be copied to.
        const TRANSFER_DST = 1 << 1;
        /// Image can be sampled in a shader.
        const SAMPLED = 1 << 2;
        /// Image can be used as a storage image.
        const STORAGE = 1 << 3;
        /// Image can be used as a color attachment.
        const COLOR_ATTACHMENT = 1 << 4;
        /// Image can be used as a depth/stencil attachment.
        const DEPTH_STENCIL_ATTACHMENT = 1 << 5;
    }
}

impl Default for ImageUsage {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Creation flags for images.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageFlags: u32 {
        /// Image views may be cube maps.
        const CUBE_COMPATIBLE = 1 << 0;
        /// Image views may reinterpret the format.
        const MUTABLE_FORMAT = 1 << 1;
    }
}

impl Default for ImageFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Image dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ImageType {
    D1 = 0,
    #[default]
    D2 = 1,
    D3 = 2,
}

/// Descriptor for creating a logical image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageInfo {
    /// Debug name for the image.
    pub name: String,
    /// Image format.
    pub format: Format,
    /// Size of the image.
    pub extent: Extent3d,
    /// Usage flags.
    pub usage: ImageUsage,
    /// Image dimensionality.
    pub image_type: ImageType,
    /// Creation flags.
    pub flags: ImageFlags,
    /// Mip level count.
    pub mip_levels: u32,
    /// Array layer count.
    pub array_layers: u32,
    /// Sample count for multisampling.
    pub sample_count: u32,
    /// Whether the image is backed by an externally owned native object.
    pub imported: bool,
}

impl ImageInfo {
    /// Create a new 2D image descriptor.
    pub fn new_2d(name: impl Into<String>, width: u32, height: u32, format: Format, usage: ImageUsage) -> Self {
        Self {
            name: name.into(),
            format,
            extent: Extent3d::new_2d(width, height),
            usage,
            image_type: ImageType::D2,
            flags: ImageFlags::empty(),
            mip_levels: 1,
            array_layers: 1,
            sample_count: 1,
            imported: false,
        }
    }

    /// Create a new 3D (volume) image descriptor.
    pub fn new_3d(
        name: impl Into<String>,
        width: u32,
        height: u32,
        depth: u32,
        format: Format,
        usage: ImageUsage,
    ) -> Self {
        Self {
            name: name.into(),
            format,
            extent: Extent3d::new_3d(width, height, depth),
            usage,
            image_type: ImageType::D3,
            flags: ImageFlags::empty(),
            mip_levels: 1,
            array_layers: 1,
            sample_count: 1,
            imported: false,
        }
    }

    /// Set the mip level count.
    pub fn with_mip_levels(mut self, count: u32) -> Self {
        self.mip_levels = count;
        self
    }

    /// Set the array layer count.
    pub fn with_array_layers(mut self, count: u32) -> Self {
        self.array_layers = count;
        self
    }

    /// Set the sample count for multisampling.
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    /// Set the creation flags.
    pub fn with_flags(mut self, flags: ImageFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the image as imported (backed by an external native object).
    ///
    /// Imported images are exempt from read-before-write validation and are
    /// never aliased with other resources.
    pub fn imported(mut self) -> Self {
        self.imported = true;
        self
    }
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            format: Format::default(),
            extent: Extent3d::default(),
            usage: ImageUsage::empty(),
            image_type: ImageType::default(),
            flags: ImageFlags::empty(),
            mip_levels: 1,
            array_layers: 1,
            sample_count: 1,
            imported: false,
        }
    }
}
