//! Logical resource meta tables.
//!
//! Creation info for every logical image and buffer is stored in SoA form,
//! indexed by the dense handle. The tables hold everything a backend needs to
//! materialize physical resources after compile; the compiler itself only
//! consults the imported flag and the compatibility predicate.

use crate::handle::{BufferHandle, ImageHandle};
use crate::types::{BufferInfo, BufferUsage, Extent3d, Format, ImageFlags, ImageInfo, ImageType, ImageUsage};

/// SoA table of logical image descriptions, indexed by image handle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImageMetaTable {
    pub(crate) names: Vec<String>,
    pub(crate) formats: Vec<Format>,
    pub(crate) extents: Vec<Extent3d>,
    pub(crate) usages: Vec<ImageUsage>,
    pub(crate) image_types: Vec<ImageType>,
    pub(crate) flags: Vec<ImageFlags>,
    pub(crate) mip_levels: Vec<u32>,
    pub(crate) array_layers: Vec<u32>,
    pub(crate) sample_counts: Vec<u32>,
    pub(crate) imported: Vec<bool>,
    pub(crate) transient: Vec<bool>,
}

impl ImageMetaTable {
    /// Append a new image meta and return its handle.
    pub(crate) fn add(&mut self, info: ImageInfo) -> ImageHandle {
        let handle = ImageHandle::from_raw(self.names.len() as u32);
        self.names.push(info.name);
        self.formats.push(info.format);
        self.extents.push(info.extent);
        self.usages.push(info.usage);
        self.image_types.push(info.image_type);
        self.flags.push(info.flags);
        self.mip_levels.push(info.mip_levels);
        self.array_layers.push(info.array_layers);
        self.sample_counts.push(info.sample_count);
        self.imported.push(info.imported);
        self.transient.push(!info.imported);
        handle
    }

    /// Number of declared images.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether no images are declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Debug name of an image.
    pub fn name(&self, image: ImageHandle) -> &str {
        &self.names[image.index()]
    }

    /// Format of an image.
    pub fn format(&self, image: ImageHandle) -> Format {
        self.formats[image.index()]
    }

    /// Extent of an image.
    pub fn extent(&self, image: ImageHandle) -> Extent3d {
        self.extents[image.index()]
    }

    /// Usage flags of an image.
    pub fn usage(&self, image: ImageHandle) -> ImageUsage {
        self.usages[image.index()]
    }

    /// Dimensionality of an image.
    pub fn image_type(&self, image: ImageHandle) -> ImageType {
        self.image_types[image.index()]
    }

    /// Creation flags of an image.
    pub fn flags(&self, image: ImageHandle) -> ImageFlags {
        self.flags[image.index()]
    }

    /// Mip level count of an image.
    pub fn mip_levels(&self, image: ImageHandle) -> u32 {
        self.mip_levels[image.index()]
    }

    /// Array layer count of an image.
    pub fn array_layers(&self, image: ImageHandle) -> u32 {
        self.array_layers[image.index()]
    }

    /// Sample count of an image.
    pub fn sample_count(&self, image: ImageHandle) -> u32 {
        self.sample_counts[image.index()]
    }

    /// Whether an image is backed by an externally owned native object.
    pub fn is_imported(&self, image: ImageHandle) -> bool {
        self.imported[image.index()]
    }

    /// Whether the compiler is free to alias the image's memory.
    pub fn is_transient(&self, image: ImageHandle) -> bool {
        self.transient[image.index()]
    }

    /// Check whether two images may share a physical slot.
    ///
    /// Strict equality of every descriptor field. Out-of-range indices are
    /// never compatible.
    pub(crate) fn is_compatible(&self, a: u32, b: u32) -> bool {
        let count = self.names.len();
        let (a, b) = (a as usize, b as usize);
        if a >= count || b >= count {
            return false;
        }
        self.formats[a] == self.formats[b]
            && self.extents[a] == self.extents[b]
            && self.usages[a] == self.usages[b]
            && self.image_types[a] == self.image_types[b]
            && self.flags[a] == self.flags[b]
            && self.mip_levels[a] == self.mip_levels[b]
            && self.array_layers[a] == self.array_layers[b]
            && self.sample_counts[a] == self.sample_counts[b]
    }

    pub(crate) fn clear(&mut self) {
        self.names.clear();
        self.formats.clear();
        self.extents.clear();
        self.usages.clear();
        self.image_types.clear();
        self.flags.clear();
        self.mip_levels.clear();
        self.array_layers.clear();
        self.sample_counts.clear();
        self.imported.clear();
        self.transient.clear();
    }
}

/// SoA table of logical buffer descriptions, indexed by buffer handle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BufferMetaTable {
    pub(crate) names: Vec<String>,
    pub(crate) sizes: Vec<u64>,
    pub(crate) usages: Vec<BufferUsage>,
    pub(crate) imported: Vec<bool>,
    pub(crate) transient: Vec<bool>,
}

impl BufferMetaTable {
    /// Append a new buffer meta and return its handle.
    pub(crate) fn add(&mut self, info: BufferInfo) -> BufferHandle {
        let handle = BufferHandle::from_raw(self.names.len() as u32);
        self.names.push(info.name);
        self.sizes.push(info.size);
        self.usages.push(info.usage);
        self.imported.push(info.imported);
        self.transient.push(!info.imported);
        handle
    }

    /// Number of declared buffers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether no buffers are declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Debug name of a buffer.
    pub fn name(&self, buffer: BufferHandle) -> &str {
        &self.names[buffer.index()]
    }

    /// Size in bytes of a buffer.
    pub fn size(&self, buffer: BufferHandle) -> u64 {
        self.sizes[buffer.index()]
    }

    /// Usage flags of a buffer.
    pub fn usage(&self, buffer: BufferHandle) -> BufferUsage {
        self.usages[buffer.index()]
    }

    /// Whether a buffer is backed by an externally owned native object.
    pub fn is_imported(&self, buffer: BufferHandle) -> bool {
        self.imported[buffer.index()]
    }

    /// Whether the compiler is free to alias the buffer's memory.
    pub fn is_transient(&self, buffer: BufferHandle) -> bool {
        self.transient[buffer.index()]
    }

    /// Check whether two buffers may share a physical slot.
    pub(crate) fn is_compatible(&self, a: u32, b: u32) -> bool {
        let count = self.names.len();
        let (a, b) = (a as usize, b as usize);
        if a >= count || b >= count {
            return false;
        }
        self.sizes[a] == self.sizes[b] && self.usages[a] == self.usages[b]
    }

    pub(crate) fn clear(&mut self) {
        self.names.clear();
        self.sizes.clear();
        self.usages.clear();
        self.imported.clear();
        self.transient.clear();
    }
}

/// The registry holding all logical resource descriptions of one compile.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResourceMetaTable {
    pub images: ImageMetaTable,
    pub buffers: BufferMetaTable,
}

impl ResourceMetaTable {
    pub(crate) fn clear(&mut self) {
        self.images.clear();
        self.buffers.clear();
    }
}
