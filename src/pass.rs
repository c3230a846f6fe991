//! Pass callbacks and the contexts handed to them.

use crate::backend::Backend;
use crate::deps::{DependencyList, OutputTable};
use crate::handle::{BufferHandle, ImageHandle};
use crate::meta::ResourceMetaTable;
use crate::types::{BufferInfo, BufferUsage, ImageInfo, ImageUsage};

/// Boxed setup callback, invoked once per pass at the start of every compile.
pub type PassSetupFn = Box<dyn FnMut(&mut PassSetupContext)>;

/// Boxed execute callback, invoked per scheduled pass during execute.
pub type PassExecuteFn = Box<dyn FnMut(&mut PassExecuteContext)>;

/// Context for declaring a pass's resources and dependencies.
///
/// Handed to the setup callback of each pass in declaration order. Creation
/// returns fresh dense handles; read/write declarations are recorded verbatim
/// and range-checked later during compile validation.
pub struct PassSetupContext<'a> {
    pub(crate) meta: &'a mut ResourceMetaTable,
    pub(crate) image_reads: &'a mut DependencyList,
    pub(crate) image_writes: &'a mut DependencyList,
    pub(crate) buffer_reads: &'a mut DependencyList,
    pub(crate) buffer_writes: &'a mut DependencyList,
    pub(crate) outputs: &'a mut OutputTable,
    pub(crate) current_pass: u32,
}

impl PassSetupContext<'_> {
    /// Create a new logical image.
    pub fn create_image(&mut self, info: ImageInfo) -> ImageHandle {
        self.meta.images.add(info)
    }

    /// Create a new logical buffer.
    pub fn create_buffer(&mut self, info: BufferInfo) -> BufferHandle {
        self.meta.buffers.add(info)
    }

    /// Declare that this pass reads an image.
    pub fn read_image(&mut self, image: ImageHandle, usage: ImageUsage) {
        self.image_reads.push(self.current_pass, image.raw(), usage.bits());
    }

    /// Declare that this pass writes an image.
    pub fn write_image(&mut self, image: ImageHandle, usage: ImageUsage) {
        self.image_writes.push(self.current_pass, image.raw(), usage.bits());
    }

    /// Declare that this pass reads a buffer.
    pub fn read_buffer(&mut self, buffer: BufferHandle, usage: BufferUsage) {
        self.buffer_reads.push(self.current_pass, buffer.raw(), usage.bits());
    }

    /// Declare that this pass writes a buffer.
    pub fn write_buffer(&mut self, buffer: BufferHandle, usage: BufferUsage) {
        self.buffer_writes.push(self.current_pass, buffer.raw(), usage.bits());
    }

    /// Declare an image as a compile output.
    ///
    /// Outputs seed culling: only passes that transitively feed an output
    /// survive. Declaring the same handle twice is equivalent to once.
    pub fn declare_image_output(&mut self, image: ImageHandle) {
        self.outputs.image_outputs.push(image.raw());
    }

    /// Declare a buffer as a compile output.
    pub fn declare_buffer_output(&mut self, buffer: BufferHandle) {
        self.outputs.buffer_outputs.push(buffer.raw());
    }
}

/// Context for executing a pass.
///
/// Resource access during execution is mediated by the backend through the
/// physical mapping it received at compile time.
pub struct PassExecuteContext<'a> {
    /// The backend executing the plan.
    pub backend: &'a mut dyn Backend,
}
