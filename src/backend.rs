//! Abstract backend interface.
//!
//! The compiler never touches a GPU API; it emits abstract records and hands
//! them to a [`Backend`] implementation (Vulkan, DX12, Metal) for lowering.
//! Physical resource creation and lifetime are owned by the backend side;
//! the compiler only provides the execution plan.

use crate::barrier::BarrierPlan;
use crate::compiler::PhysicalResourceTable;
use crate::handle::{BufferHandle, ImageHandle, PassHandle};
use crate::meta::ResourceMetaTable;

/// Opaque native object handle (`VkImage`, `ID3D12Resource*`, ...).
pub type NativeHandle = usize;

/// Interface implemented by concrete GPU backends.
pub trait Backend {
    /// Called at the end of a successful compile.
    ///
    /// The backend may materialize transient physical resources from the
    /// representative metas and bind previously imported native objects.
    fn on_compile_resource_allocation(&mut self, meta: &ResourceMetaTable, physical: &PhysicalResourceTable) {
        let _ = (meta, physical);
    }

    /// Declare that a logical image is backed by a pre-existing native object.
    ///
    /// Called by the host before compile (swapchain images, history buffers
    /// owned elsewhere). Backends may defer the actual binding until the
    /// physical mapping is known.
    fn bind_imported_image(&mut self, logical: ImageHandle, native_image: NativeHandle, native_view: NativeHandle) {
        let _ = (logical, native_image, native_view);
    }

    /// Declare that a logical buffer is backed by a pre-existing native object.
    fn bind_imported_buffer(&mut self, logical: BufferHandle, native_buffer: NativeHandle) {
        let _ = (logical, native_buffer);
    }

    /// Lower the barrier ops belonging to `pass` into native synchronization
    /// primitives. Invoked before the pass's execute callback.
    fn apply_barriers(&mut self, pass: PassHandle, plan: &BarrierPlan);
}
