//! Compile error types.

use thiserror::Error;

use crate::barrier::ResourceKind;

/// Errors that can occur during graph compilation.
///
/// Every variant is fatal: compilation aborts and the system's intermediate
/// state is unspecified until the next [`compile`](crate::RenderGraphSystem::compile)
/// or [`clear`](crate::RenderGraphSystem::clear).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    /// No image and no buffer outputs were declared; culling would discard
    /// every pass.
    #[error("no outputs declared")]
    NoOutputsDeclared,

    /// A pass read a handle beyond the size of the resource meta table.
    #[error("pass {pass} reads out-of-range {kind} handle {handle}")]
    ReadOutOfRange { kind: ResourceKind, pass: u32, handle: u32 },

    /// A pass wrote a handle beyond the size of the resource meta table.
    #[error("pass {pass} writes out-of-range {kind} handle {handle}")]
    WriteOutOfRange { kind: ResourceKind, pass: u32, handle: u32 },

    /// A non-imported resource was read with no producing write recorded at
    /// that point.
    #[error("pass {pass} reads {kind} {handle} before any write")]
    ReadBeforeWrite { kind: ResourceKind, pass: u32, handle: u32 },

    /// Topological sorting visited fewer passes than are live.
    #[error("render graph contains cyclic dependency")]
    CyclicDependency,

    /// DAG array shapes do not match the pass count.
    #[error("DAG arrays do not match pass count")]
    DagShapeMismatch,
}
