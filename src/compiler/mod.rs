//! Render graph compilation stages.
//!
//! [`compile`](crate::RenderGraphSystem::compile) runs these stages in order,
//! each consuming the flat arrays the previous stage produced:
//!
//! 1. **Versioning** - derive versioned read/write views
//! 2. **Producer index** - flat (handle, version) → pass table
//! 3. **Culling** - reverse BFS from declared outputs
//! 4. **Validation** - fail fast on malformed graphs
//! 5. **DAG** - producer → consumer edges in CSR form
//! 6. **Scheduling** - Kahn topological sort
//! 7. **Lifetimes** - first/last scheduled use per resource
//! 8. **Aliasing** - greedy first-fit physical slot assignment
//! 9. **Barriers** - per-pass transition/UAV/aliasing ops
//!
//! Every stage is a linear sweep over dense index-addressed arrays; none of
//! them walk pointer graphs.

pub(crate) mod alias;
pub(crate) mod barriers;
pub(crate) mod culling;
pub(crate) mod dag;
pub(crate) mod lifetime;
pub(crate) mod producer;
pub(crate) mod schedule;
pub(crate) mod validate;
pub(crate) mod version;

pub use alias::PhysicalResourceTable;
pub use dag::{check_acyclic, DirectedAcyclicGraph};
pub use lifetime::LifetimeTable;
pub use producer::ProducerIndex;
