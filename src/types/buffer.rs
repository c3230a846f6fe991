//! Buffer description types.

use bitflags::bitflags;

bitflags! {
    /// Usage flags for buffers.
    ///
    /// The bit values are a stable wire-level contract shared with backends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Buffer can be copied from.
        const TRANSFER_SRC = 1 << 0;
        /// Buffer can be copied to.
        const TRANSFER_DST = 1 << 1;
        /// Buffer can be bound as a uniform buffer.
        const UNIFORM_BUFFER = 1 << 2;
        /// Buffer can be bound as a storage buffer.
        const STORAGE_BUFFER = 1 << 3;
        /// Buffer can be bound as an index buffer.
        const INDEX_BUFFER = 1 << 4;
        /// Buffer can be bound as a vertex buffer.
        const VERTEX_BUFFER = 1 << 5;
        /// Buffer can source indirect draw/dispatch arguments.
        const INDIRECT_BUFFER = 1 << 6;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor for creating a logical buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BufferInfo {
    /// Debug name for the buffer.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Usage flags.
    pub usage: BufferUsage,
    /// Whether the buffer is backed by an externally owned native object.
    pub imported: bool,
}

impl BufferInfo {
    /// Create a new buffer descriptor.
    pub fn new(name: impl Into<String>, size: u64, usage: BufferUsage) -> Self {
        Self {
            name: name.into(),
            size,
            usage,
            imported: false,
        }
    }

    /// Mark the buffer as imported (backed by an external native object).
    pub fn imported(mut self) -> Self {
        self.imported = true;
        self
    }
}
