//! The render graph system.
//!
//! Owns the declared passes, all compile-time tables, and the optional
//! backend. [`compile`](RenderGraphSystem::compile) is a synchronous
//! transformation from setup callbacks to an execution plan; it performs no
//! I/O and allocates nothing beyond growing its own flat buffers.

use log::{debug, trace};

use crate::backend::Backend;
use crate::barrier::BarrierPlan;
use crate::compiler::alias::PhysicalResourceTable;
use crate::compiler::dag::DirectedAcyclicGraph;
use crate::compiler::lifetime::LifetimeTable;
use crate::compiler::producer::ProducerIndex;
use crate::compiler::version::VersionedDeps;
use crate::compiler::{alias, barriers, culling, dag, lifetime, schedule, validate};
use crate::deps::{DependencyList, OutputTable};
use crate::error::CompileError;
use crate::handle::PassHandle;
use crate::meta::ResourceMetaTable;
use crate::pass::{PassExecuteContext, PassExecuteFn, PassSetupContext, PassSetupFn};
use crate::profiling::{profile_function, profile_scope};

/// Render graph compiler and executor.
///
/// Passes are added once with [`add_pass`](Self::add_pass); every
/// [`compile`](Self::compile) re-runs their setup callbacks, so a system can
/// be recompiled whenever the graph's inputs change (e.g. on resize).
/// Compiling the same system twice produces an identical plan.
///
/// A system instance is single-threaded and non-reentrant; independent
/// instances may be compiled in parallel by the host.
///
/// # Example
///
/// ```
/// use firethorn::{Format, ImageInfo, ImageUsage, RenderGraphSystem};
///
/// let mut system = RenderGraphSystem::new();
/// system.add_setup_pass(|ctx| {
///     let target = ctx.create_image(ImageInfo::new_2d(
///         "target", 1280, 720,
///         Format::Rgba8Unorm,
///         ImageUsage::COLOR_ATTACHMENT,
///     ));
///     ctx.write_image(target, ImageUsage::COLOR_ATTACHMENT);
///     ctx.declare_image_output(target);
/// });
/// system.compile().unwrap();
/// assert_eq!(system.schedule().len(), 1);
/// ```
#[derive(Default)]
pub struct RenderGraphSystem {
    // Resource tables
    meta: ResourceMetaTable,
    image_reads: DependencyList,
    image_writes: DependencyList,
    buffer_reads: DependencyList,
    buffer_writes: DependencyList,
    outputs: OutputTable,

    // Versioned views derived during compile
    image_versions: VersionedDeps,
    buffer_versions: VersionedDeps,
    image_producers: ProducerIndex,
    buffer_producers: ProducerIndex,

    // Pass topology
    setup_fns: Vec<PassSetupFn>,
    execute_fns: Vec<Option<PassExecuteFn>>,
    live: Vec<bool>,
    dag: DirectedAcyclicGraph,
    schedule: Vec<PassHandle>,
    order_index: Vec<u32>,

    // Plan outputs
    image_lifetimes: LifetimeTable,
    buffer_lifetimes: LifetimeTable,
    physical: PhysicalResourceTable,
    barriers: BarrierPlan,

    backend: Option<Box<dyn Backend>>,
}

impl RenderGraphSystem {
    /// Create a new empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the backend that will receive the compiled plan.
    pub fn set_backend(&mut self, backend: Box<dyn Backend>) {
        self.backend = Some(backend);
    }

    /// Remove and return the installed backend.
    pub fn take_backend(&mut self) -> Option<Box<dyn Backend>> {
        self.backend.take()
    }

    /// Mutable access to the installed backend (e.g. for imported bindings).
    pub fn backend_mut(&mut self) -> Option<&mut (dyn Backend + '_)> {
        match &mut self.backend {
            Some(b) => Some(b.as_mut()),
            None => None,
        }
    }

    /// Add a pass with a setup and an execute callback.
    ///
    /// Pass handles are assigned in call order; this order is the
    /// declaration order used by versioning and scheduling tie-breaks.
    pub fn add_pass<S, E>(&mut self, setup: S, execute: E) -> PassHandle
    where
        S: FnMut(&mut PassSetupContext) + 'static,
        E: FnMut(&mut PassExecuteContext) + 'static,
    {
        let handle = PassHandle::new(self.setup_fns.len() as u32);
        self.setup_fns.push(Box::new(setup));
        self.execute_fns.push(Some(Box::new(execute)));
        handle
    }

    /// Add a pass with only a setup callback.
    ///
    /// The pass participates fully in compilation but is skipped silently
    /// during execute. Useful for plan-only workflows and tests.
    pub fn add_setup_pass<S>(&mut self, setup: S) -> PassHandle
    where
        S: FnMut(&mut PassSetupContext) + 'static,
    {
        let handle = PassHandle::new(self.setup_fns.len() as u32);
        self.setup_fns.push(Box::new(setup));
        self.execute_fns.push(None);
        handle
    }

    /// Number of declared passes (live or not).
    pub fn pass_count(&self) -> usize {
        self.setup_fns.len()
    }

    /// Compile the graph into an execution plan.
    ///
    /// Re-runs every setup callback, then derives versions, the producer
    /// index, liveness, the DAG, the schedule, resource lifetimes, the
    /// physical mapping and the barrier plan. On error the intermediate
    /// state is unspecified until the next `compile` or [`clear`](Self::clear).
    pub fn compile(&mut self) -> Result<(), CompileError> {
        profile_function!();

        let pass_count = self.setup_fns.len();

        // Reset all tables: setup callbacks are the only source of resources,
        // so recompiling observes exactly this run's declarations.
        self.meta.clear();
        self.outputs.clear();
        self.image_reads.reset(pass_count);
        self.image_writes.reset(pass_count);
        self.buffer_reads.reset(pass_count);
        self.buffer_writes.reset(pass_count);

        // Stage 1: invoke setup callbacks to capture resources and intents.
        {
            profile_scope!("setup_passes");
            for pass in 0..pass_count as u32 {
                self.image_reads.mark_begin(pass);
                self.image_writes.mark_begin(pass);
                self.buffer_reads.mark_begin(pass);
                self.buffer_writes.mark_begin(pass);

                let setup = &mut self.setup_fns[pass as usize];
                let mut ctx = PassSetupContext {
                    meta: &mut self.meta,
                    image_reads: &mut self.image_reads,
                    image_writes: &mut self.image_writes,
                    buffer_reads: &mut self.buffer_reads,
                    buffer_writes: &mut self.buffer_writes,
                    outputs: &mut self.outputs,
                    current_pass: pass,
                };
                setup(&mut ctx);
            }
            trace!(
                "setup: {} images, {} buffers, {}/{} image reads/writes, {}/{} buffer reads/writes",
                self.meta.images.len(),
                self.meta.buffers.len(),
                self.image_reads.len(),
                self.image_writes.len(),
                self.buffer_reads.len(),
                self.buffer_writes.len(),
            );
        }

        let image_count = self.meta.images.len();
        let buffer_count = self.meta.buffers.len();

        // Stage 2: derive versioned read/write views.
        {
            profile_scope!("assign_versions");
            self.image_versions.assign(pass_count, &self.image_reads, &self.image_writes, image_count);
            self.buffer_versions.assign(pass_count, &self.buffer_reads, &self.buffer_writes, buffer_count);
            trace!(
                "versioning: {} image versions, {} buffer versions",
                self.image_versions.version_counts.iter().sum::<u32>(),
                self.buffer_versions.version_counts.iter().sum::<u32>(),
            );
        }

        // Stage 3: build (handle, version) -> producing pass lookup.
        {
            profile_scope!("build_producer_index");
            self.image_producers.build(
                pass_count,
                &self.image_writes,
                &self.image_versions.writes,
                &self.image_versions.version_counts,
            );
            self.buffer_producers.build(
                pass_count,
                &self.buffer_writes,
                &self.buffer_versions.writes,
                &self.buffer_versions.version_counts,
            );
            trace!(
                "producer index: {} image entries, {} buffer entries",
                self.image_producers.producers.len(),
                self.buffer_producers.producers.len(),
            );
        }

        // Stage 4: cull passes that don't feed any declared output.
        {
            profile_scope!("cull_passes");
            culling::mark_live(
                pass_count,
                &self.outputs,
                &self.image_reads,
                &self.buffer_reads,
                &self.image_versions.reads,
                &self.buffer_versions.reads,
                &self.image_producers,
                &self.buffer_producers,
                &mut self.live,
            );
            trace!(
                "culling: {} of {} passes live",
                self.live.iter().filter(|&&flag| flag).count(),
                pass_count,
            );
        }

        // Stage 5: fail fast on malformed graphs (live passes only).
        {
            profile_scope!("validate");
            validate::validate(
                pass_count,
                &self.live,
                &self.outputs,
                &self.image_reads,
                &self.image_writes,
                &self.buffer_reads,
                &self.buffer_writes,
                &self.image_versions.reads,
                &self.image_versions.writes,
                &self.buffer_versions.reads,
                &self.buffer_versions.writes,
                &self.image_producers,
                &self.buffer_producers,
                &self.meta.images.imported,
                &self.meta.buffers.imported,
            )?;
            trace!(
                "validation: {} image outputs, {} buffer outputs",
                self.outputs.image_outputs.len(),
                self.outputs.buffer_outputs.len(),
            );
        }

        // Stage 6: producer -> consumer DAG over live passes.
        {
            profile_scope!("build_dag");
            dag::build(
                &mut self.dag,
                pass_count,
                &self.live,
                &self.image_reads,
                &self.buffer_reads,
                &self.image_versions.reads,
                &self.buffer_versions.reads,
                &self.image_producers,
                &self.buffer_producers,
            );
            trace!("dag: {} edges", self.dag.adjacency.len());
        }

        // Stage 7: topological schedule (also detects cycles).
        {
            profile_scope!("topological_sort");
            let mut in_degree_scratch = Vec::new();
            schedule::topological_order(&self.dag, &self.live, &mut self.schedule, &mut in_degree_scratch)?;
            schedule::build_order_index(&self.schedule, pass_count, &mut self.order_index);
            trace!("schedule: {} passes", self.schedule.len());
        }

        // Stage 8: first/last scheduled use per resource.
        {
            profile_scope!("analyze_lifetimes");
            lifetime::analyze(
                &self.schedule,
                &self.order_index,
                &self.image_reads,
                &self.image_writes,
                image_count,
                &mut self.image_lifetimes,
            );
            lifetime::analyze(
                &self.schedule,
                &self.order_index,
                &self.buffer_reads,
                &self.buffer_writes,
                buffer_count,
                &mut self.buffer_lifetimes,
            );
            trace!(
                "lifetimes: {} images used, {} buffers used",
                (0..image_count as u32).filter(|&h| self.image_lifetimes.interval(h).is_some()).count(),
                (0..buffer_count as u32).filter(|&h| self.buffer_lifetimes.interval(h).is_some()).count(),
            );
        }

        // Stage 9: greedy first-fit aliasing into physical slots.
        {
            profile_scope!("alias_resources");
            self.physical.clear();
            let images = &self.meta.images;
            alias::assign(
                &self.image_lifetimes,
                &images.imported,
                |a, b| images.is_compatible(a, b),
                &mut self.physical.physical_images,
                &mut self.physical.image_to_physical,
            );
            let buffers = &self.meta.buffers;
            alias::assign(
                &self.buffer_lifetimes,
                &buffers.imported,
                |a, b| buffers.is_compatible(a, b),
                &mut self.physical.physical_buffers,
                &mut self.physical.buffer_to_physical,
            );
            trace!(
                "aliasing: {} images -> {} slots, {} buffers -> {} slots",
                image_count,
                self.physical.physical_image_count(),
                buffer_count,
                self.physical.physical_buffer_count(),
            );
        }

        // Stage 10: per-pass synchronization plan.
        {
            profile_scope!("plan_barriers");
            barriers::build_plan(
                pass_count,
                &self.schedule,
                &self.image_reads,
                &self.image_writes,
                &self.buffer_reads,
                &self.buffer_writes,
                &self.physical,
                &mut self.barriers,
            );
            trace!("barriers: {} ops", self.barriers.op_count());
        }

        debug!(
            "compiled render graph: {} passes ({} live), {} images -> {} physical, {} buffers -> {} physical, {} barrier ops",
            pass_count,
            self.schedule.len(),
            image_count,
            self.physical.physical_image_count(),
            buffer_count,
            self.physical.physical_buffer_count(),
            self.barriers.op_count(),
        );

        // Let the backend materialize transient resources and bind imports.
        if let Some(backend) = self.backend.as_deref_mut() {
            backend.on_compile_resource_allocation(&self.meta, &self.physical);
        }

        Ok(())
    }

    /// Execute the compiled plan.
    ///
    /// Walks the schedule, applying each pass's barrier slice through the
    /// backend before invoking its execute callback. Without a backend this
    /// is a no-op; passes without an execute callback are skipped silently.
    pub fn execute(&mut self) {
        profile_function!();

        let Some(backend) = self.backend.as_deref_mut() else {
            return;
        };

        for pass in &self.schedule {
            backend.apply_barriers(*pass, &self.barriers);

            if let Some(execute) = self.execute_fns.get_mut(pass.index()).and_then(|slot| slot.as_mut()) {
                let mut ctx = PassExecuteContext { backend: &mut *backend };
                execute(&mut ctx);
            }
        }
    }

    /// Remove every pass and resource, returning the system to its freshly
    /// constructed state. Allocations are retained for reuse; the backend
    /// stays installed.
    pub fn clear(&mut self) {
        self.setup_fns.clear();
        self.execute_fns.clear();
        self.meta.clear();
        self.outputs.clear();
        self.image_reads.reset(0);
        self.image_writes.reset(0);
        self.buffer_reads.reset(0);
        self.buffer_writes.reset(0);
        self.image_versions.clear();
        self.buffer_versions.clear();
        self.image_producers.clear();
        self.buffer_producers.clear();
        self.live.clear();
        self.dag.clear();
        self.schedule.clear();
        self.order_index.clear();
        self.image_lifetimes.clear();
        self.buffer_lifetimes.clear();
        self.physical.clear();
        self.barriers.clear();
    }

    // ========================================================================
    // Plan accessors
    // ========================================================================

    /// The resource meta tables captured by the last compile.
    pub fn meta(&self) -> &ResourceMetaTable {
        &self.meta
    }

    /// Image read intents (flat CSR per pass).
    pub fn image_reads(&self) -> &DependencyList {
        &self.image_reads
    }

    /// Image write intents (flat CSR per pass).
    pub fn image_writes(&self) -> &DependencyList {
        &self.image_writes
    }

    /// Buffer read intents (flat CSR per pass).
    pub fn buffer_reads(&self) -> &DependencyList {
        &self.buffer_reads
    }

    /// Buffer write intents (flat CSR per pass).
    pub fn buffer_writes(&self) -> &DependencyList {
        &self.buffer_writes
    }

    /// Version -> producing pass index for images.
    pub fn image_producers(&self) -> &ProducerIndex {
        &self.image_producers
    }

    /// Version -> producing pass index for buffers.
    pub fn buffer_producers(&self) -> &ProducerIndex {
        &self.buffer_producers
    }

    /// Whether a pass survived culling in the last compile.
    pub fn is_live(&self, pass: PassHandle) -> bool {
        self.live.get(pass.index()).copied().unwrap_or(false)
    }

    /// The pass dependency DAG of the last compile.
    pub fn dag(&self) -> &DirectedAcyclicGraph {
        &self.dag
    }

    /// The scheduled execution order of live passes.
    pub fn schedule(&self) -> &[PassHandle] {
        &self.schedule
    }

    /// Image lifetimes as schedule-index intervals.
    pub fn image_lifetimes(&self) -> &LifetimeTable {
        &self.image_lifetimes
    }

    /// Buffer lifetimes as schedule-index intervals.
    pub fn buffer_lifetimes(&self) -> &LifetimeTable {
        &self.buffer_lifetimes
    }

    /// Logical -> physical resource mapping of the last compile.
    pub fn physical_resources(&self) -> &PhysicalResourceTable {
        &self.physical
    }

    /// The per-pass barrier plan of the last compile.
    pub fn barrier_plan(&self) -> &BarrierPlan {
        &self.barriers
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::barrier::BarrierOpType;
    use crate::handle::{BufferHandle, ImageHandle};
    use crate::types::{BufferInfo, BufferUsage, Format, ImageInfo, ImageUsage};

    fn color_image(name: &str) -> ImageInfo {
        ImageInfo::new_2d(name, 64, 64, Format::Rgba8Unorm, ImageUsage::COLOR_ATTACHMENT)
    }

    /// Straight-line chain: A writes img_a; B reads img_a, writes img_b;
    /// C reads img_b, writes img_out and declares it as output.
    fn build_chain(system: &mut RenderGraphSystem) -> (PassHandle, PassHandle, PassHandle) {
        #[derive(Default)]
        struct Handles {
            img_a: ImageHandle,
            img_b: ImageHandle,
        }
        let handles = Rc::new(RefCell::new(Handles::default()));

        let h = handles.clone();
        let a = system.add_setup_pass(move |ctx| {
            let img_a = ctx.create_image(color_image("img_a"));
            ctx.write_image(img_a, ImageUsage::COLOR_ATTACHMENT);
            h.borrow_mut().img_a = img_a;
        });

        let h = handles.clone();
        let b = system.add_setup_pass(move |ctx| {
            let img_a = h.borrow().img_a;
            ctx.read_image(img_a, ImageUsage::SAMPLED);
            let img_b = ctx.create_image(color_image("img_b"));
            ctx.write_image(img_b, ImageUsage::COLOR_ATTACHMENT);
            h.borrow_mut().img_b = img_b;
        });

        let h = handles.clone();
        let c = system.add_setup_pass(move |ctx| {
            let img_b = h.borrow().img_b;
            ctx.read_image(img_b, ImageUsage::SAMPLED);
            let img_out = ctx.create_image(color_image("img_out"));
            ctx.write_image(img_out, ImageUsage::COLOR_ATTACHMENT);
            ctx.declare_image_output(img_out);
        });

        (a, b, c)
    }

    #[test]
    fn test_straight_line_chain() {
        let mut system = RenderGraphSystem::new();
        let (a, b, c) = build_chain(&mut system);
        system.compile().unwrap();

        assert!(system.is_live(a));
        assert!(system.is_live(b));
        assert!(system.is_live(c));

        assert_eq!(system.dag().in_degree(a), 0);
        assert_eq!(system.dag().in_degree(b), 1);
        assert_eq!(system.dag().in_degree(c), 1);
        assert_eq!(system.dag().out_degree(a), 1);
        assert_eq!(system.dag().out_degree(b), 1);
        assert_eq!(system.dag().out_degree(c), 0);

        assert_eq!(system.schedule(), [a, b, c]);
    }

    #[test]
    fn test_dead_branch_is_culled() {
        let mut system = RenderGraphSystem::new();
        let (a, b, c) = build_chain(&mut system);

        let dead = Rc::new(RefCell::new(ImageHandle::default()));
        let h = dead.clone();
        let d = system.add_setup_pass(move |ctx| {
            let img = ctx.create_image(color_image("dead"));
            ctx.write_image(img, ImageUsage::COLOR_ATTACHMENT);
            *h.borrow_mut() = img;
        });
        let h = dead.clone();
        let e = system.add_setup_pass(move |ctx| {
            let img = *h.borrow();
            ctx.read_image(img, ImageUsage::SAMPLED);
            let sink = ctx.create_image(color_image("dead_sink"));
            ctx.write_image(sink, ImageUsage::COLOR_ATTACHMENT);
        });

        system.compile().unwrap();

        assert!(!system.is_live(d));
        assert!(!system.is_live(e));
        assert_eq!(system.schedule(), [a, b, c]);
    }

    #[test]
    fn test_no_outputs_fails() {
        let mut system = RenderGraphSystem::new();
        system.add_setup_pass(|ctx| {
            let img = ctx.create_image(color_image("orphan"));
            ctx.write_image(img, ImageUsage::COLOR_ATTACHMENT);
        });
        assert_eq!(system.compile(), Err(CompileError::NoOutputsDeclared));
    }

    #[test]
    fn test_empty_system_fails_with_no_outputs() {
        let mut system = RenderGraphSystem::new();
        assert_eq!(system.compile(), Err(CompileError::NoOutputsDeclared));
    }

    #[test]
    fn test_imported_read_without_producer_compiles() {
        let mut system = RenderGraphSystem::new();
        system.add_setup_pass(|ctx| {
            let ext = ctx.create_image(
                ImageInfo::new_2d("ext", 64, 64, Format::Rgba8Unorm, ImageUsage::SAMPLED).imported(),
            );
            ctx.read_image(ext, ImageUsage::SAMPLED);
            let out = ctx.create_image(color_image("out"));
            ctx.write_image(out, ImageUsage::COLOR_ATTACHMENT);
            ctx.declare_image_output(out);
        });

        system.compile().unwrap();

        let physical = system.physical_resources();
        let ext = ImageHandle::from_raw(0);
        let out = ImageHandle::from_raw(1);
        assert_eq!(physical.physical_image_count(), 2);
        assert_ne!(physical.image_physical(ext), physical.image_physical(out));
    }

    #[test]
    fn test_recompilation_is_deterministic() {
        let mut system = RenderGraphSystem::new();
        build_chain(&mut system);
        system.add_setup_pass(|ctx| {
            let hist = ctx.create_buffer(BufferInfo::new("hist", 1024, BufferUsage::STORAGE_BUFFER));
            ctx.write_buffer(hist, BufferUsage::STORAGE_BUFFER);
        });

        system.compile().unwrap();
        let image_reads = system.image_reads().clone();
        let image_writes = system.image_writes().clone();
        let producers = system.image_producers().clone();
        let dag = system.dag().clone();
        let schedule = system.schedule().to_vec();
        let lifetimes = system.image_lifetimes().clone();
        let physical = system.physical_resources().clone();
        let barriers = system.barrier_plan().clone();

        system.compile().unwrap();
        assert_eq!(system.image_reads(), &image_reads);
        assert_eq!(system.image_writes(), &image_writes);
        assert_eq!(system.image_producers(), &producers);
        assert_eq!(system.dag(), &dag);
        assert_eq!(system.schedule(), schedule.as_slice());
        assert_eq!(system.image_lifetimes(), &lifetimes);
        assert_eq!(system.physical_resources(), &physical);
        assert_eq!(system.barrier_plan(), &barriers);
    }

    #[test]
    fn test_clear_removes_passes_and_resources() {
        let mut system = RenderGraphSystem::new();
        build_chain(&mut system);
        system.compile().unwrap();

        system.clear();
        assert_eq!(system.pass_count(), 0);
        assert!(system.schedule().is_empty());
        assert!(system.meta().images.is_empty());
        assert_eq!(system.compile(), Err(CompileError::NoOutputsDeclared));
    }

    // ========================================================================
    // Execute phase
    // ========================================================================

    #[derive(Default)]
    struct RecordingBackend {
        applied: Rc<RefCell<Vec<(usize, Vec<BarrierOpType>)>>>,
    }

    impl Backend for RecordingBackend {
        fn apply_barriers(&mut self, pass: PassHandle, plan: &BarrierPlan) {
            let ops = plan.pass_ops(pass).map(|op| op.op_type).collect();
            self.applied.borrow_mut().push((pass.index(), ops));
        }
    }

    #[test]
    fn test_execute_without_backend_is_noop() {
        let mut system = RenderGraphSystem::new();
        build_chain(&mut system);
        system.compile().unwrap();
        system.execute();
    }

    #[test]
    fn test_execute_applies_barriers_then_callbacks_in_schedule_order() {
        let mut system = RenderGraphSystem::new();

        let ran = Rc::new(RefCell::new(Vec::new()));
        let r = ran.clone();
        system.add_pass(
            |ctx| {
                let img = ctx.create_image(color_image("out"));
                ctx.write_image(img, ImageUsage::COLOR_ATTACHMENT);
                ctx.declare_image_output(img);
            },
            move |_ctx| r.borrow_mut().push("draw"),
        );
        // Plan-only pass: skipped silently during execute.
        system.add_setup_pass(|ctx| {
            ctx.read_image(ImageHandle::from_raw(0), ImageUsage::SAMPLED);
            let blur = ctx.create_image(color_image("blur"));
            ctx.write_image(blur, ImageUsage::COLOR_ATTACHMENT);
            ctx.declare_image_output(blur);
        });

        let applied = Rc::new(RefCell::new(Vec::new()));
        system.set_backend(Box::new(RecordingBackend {
            applied: applied.clone(),
        }));

        system.compile().unwrap();
        system.execute();

        let applied = applied.borrow();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].0, 0);
        assert_eq!(applied[1].0, 1);
        // Pass 1 reads what pass 0 wrote: its slice carries the transition.
        assert_eq!(applied[1].1, vec![BarrierOpType::Transition]);
        assert_eq!(*ran.borrow(), vec!["draw"]);
    }

    #[test]
    fn test_buffer_only_output_keeps_graph_alive() {
        let mut system = RenderGraphSystem::new();
        let handle = Rc::new(RefCell::new(BufferHandle::default()));

        let h = handle.clone();
        let producer = system.add_setup_pass(move |ctx| {
            let buf = ctx.create_buffer(BufferInfo::new("reduced", 256, BufferUsage::STORAGE_BUFFER));
            ctx.write_buffer(buf, BufferUsage::STORAGE_BUFFER);
            *h.borrow_mut() = buf;
        });
        let h = handle.clone();
        let consumer = system.add_setup_pass(move |ctx| {
            let buf = *h.borrow();
            ctx.read_buffer(buf, BufferUsage::STORAGE_BUFFER);
            let result = ctx.create_buffer(BufferInfo::new("result", 256, BufferUsage::STORAGE_BUFFER));
            ctx.write_buffer(result, BufferUsage::STORAGE_BUFFER);
            ctx.declare_buffer_output(result);
        });

        system.compile().unwrap();
        assert_eq!(system.schedule(), [producer, consumer]);
        // Storage write -> storage read needs a UAV op on the consumer.
        assert!(
            system
                .barrier_plan()
                .pass_ops(consumer)
                .any(|op| op.op_type == BarrierOpType::Uav)
        );

        // Both buffers overlap at the consumer, so each owns a slot whose
        // representative is the buffer itself.
        let reduced = *handle.borrow();
        let physical = system.physical_resources();
        assert_eq!(physical.physical_buffer_count(), 2);
        let slot = physical.buffer_physical(reduced).unwrap();
        assert_eq!(physical.buffer_representative(slot), reduced);
    }
}
