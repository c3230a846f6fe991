//! # Firethorn
//!
//! A data-oriented render graph compiler.
//!
//! Hosts declare GPU passes with read/write resource intents; the compiler
//! turns them into an execution plan:
//!
//! - a topologically sorted order of live passes
//! - a logical -> physical resource mapping with transient memory aliasing
//! - a per-pass sequence of abstract synchronization barriers
//!
//! The plan is API-agnostic; concrete Vulkan/DX12/Metal backends implement
//! [`Backend`] to materialize resources and lower barriers. The compiler
//! itself never touches a GPU API.
//!
//! # Example
//!
//! ```
//! use firethorn::{Format, ImageInfo, ImageUsage, RenderGraphSystem};
//!
//! let mut system = RenderGraphSystem::new();
//!
//! system.add_setup_pass(|ctx| {
//!     let target = ctx.create_image(ImageInfo::new_2d(
//!         "scene", 1280, 720,
//!         Format::Rgba8Unorm,
//!         ImageUsage::COLOR_ATTACHMENT,
//!     ));
//!     ctx.write_image(target, ImageUsage::COLOR_ATTACHMENT);
//!     ctx.declare_image_output(target);
//! });
//!
//! system.compile().unwrap();
//! ```
//!
//! # Design
//!
//! Every compile stage is a linear sweep over dense, index-addressed flat
//! arrays (SoA meta tables, CSR dependency lists and adjacency). Handles are
//! small integers; packed versioned handles are unpacked before any array
//! access.

pub mod backend;
pub mod barrier;
pub mod compiler;
pub mod deps;
pub mod error;
pub mod handle;
pub mod meta;
pub mod pass;
pub mod profiling;
pub mod system;
pub mod types;

pub use backend::{Backend, NativeHandle};
pub use barrier::{AccessType, BarrierOp, BarrierOpType, BarrierPlan, PipelineDomain, ResourceKind};
pub use compiler::{DirectedAcyclicGraph, LifetimeTable, PhysicalResourceTable, ProducerIndex, check_acyclic};
pub use deps::{DependencyList, OutputTable};
pub use error::CompileError;
pub use handle::{BufferHandle, ImageHandle, INVALID_PASS, INVALID_RESOURCE, PassHandle, VersionedHandle};
pub use meta::{BufferMetaTable, ImageMetaTable, ResourceMetaTable};
pub use pass::{PassExecuteContext, PassExecuteFn, PassSetupContext, PassSetupFn};
pub use system::RenderGraphSystem;
pub use types::{BufferInfo, BufferUsage, Extent3d, Format, ImageFlags, ImageInfo, ImageType, ImageUsage};
