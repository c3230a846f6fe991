//! Barrier plan generation.
//!
//! Walks passes in schedule order and tracks the last use of every physical
//! slot. Per pass, all read/write records touching one logical resource are
//! merged into a single access descriptor (ORed usage bits + read/write/
//! read-write level); the merge preserves first-touch order so the emitted
//! plan is reproducible. Three op kinds result:
//!
//! - aliasing, when the slot's logical identity changes
//! - transition, when usage bits, access level or source domain change
//! - UAV, ordering back-to-back storage accesses after a non-read
//!
//! A pass is treated as an atomic unit; ordering inside a pass belongs to
//! the backend's command recording.

use crate::barrier::{AccessType, BarrierOp, BarrierOpType, BarrierPlan, PipelineDomain, ResourceKind};
use crate::deps::DependencyList;
use crate::handle::{INVALID_RESOURCE, PassHandle};
use crate::types::{BufferUsage, ImageUsage};

use super::alias::PhysicalResourceTable;

#[derive(Debug, Clone, Copy)]
struct LastUse {
    logical: u32,
    usage_bits: u32,
    domain: PipelineDomain,
    access: AccessType,
    valid: bool,
}

impl Default for LastUse {
    fn default() -> Self {
        Self {
            logical: 0,
            usage_bits: 0,
            domain: PipelineDomain::Any,
            access: AccessType::Read,
            valid: false,
        }
    }
}

/// Merged per-pass accesses of one resource kind, in first-touch order.
#[derive(Debug, Default)]
struct MergedAccesses {
    logicals: Vec<u32>,
    reads: Vec<bool>,
    writes: Vec<bool>,
    usage_bits: Vec<u32>,
}

impl MergedAccesses {
    fn clear(&mut self) {
        self.logicals.clear();
        self.reads.clear();
        self.writes.clear();
        self.usage_bits.clear();
    }

    fn slot(&mut self, logical: u32) -> usize {
        // Linear scan keeps first-touch order; per-pass touch counts are small.
        match self.logicals.iter().position(|&l| l == logical) {
            Some(slot) => slot,
            None => {
                self.logicals.push(logical);
                self.reads.push(false);
                self.writes.push(false);
                self.usage_bits.push(0);
                self.logicals.len() - 1
            }
        }
    }

    fn merge(&mut self, pass: u32, reads: &DependencyList, writes: &DependencyList) {
        self.clear();
        for j in reads.range(pass) {
            let slot = self.slot(reads.resource(j));
            self.reads[slot] = true;
            self.usage_bits[slot] |= reads.usage_bits(j);
        }
        for j in writes.range(pass) {
            let slot = self.slot(writes.resource(j));
            self.writes[slot] = true;
            self.usage_bits[slot] |= writes.usage_bits(j);
        }
    }
}

fn to_access(has_read: bool, has_write: bool) -> AccessType {
    match (has_read, has_write) {
        (true, true) => AccessType::ReadWrite,
        (false, true) => AccessType::Write,
        _ => AccessType::Read,
    }
}

fn has_storage_usage(kind: ResourceKind, usage_bits: u32) -> bool {
    match kind {
        ResourceKind::Image => usage_bits & ImageUsage::STORAGE.bits() != 0,
        ResourceKind::Buffer => usage_bits & BufferUsage::STORAGE_BUFFER.bits() != 0,
    }
}

#[allow(clippy::too_many_arguments)]
fn insert_ops(
    ops: &mut Vec<BarrierOp>,
    last_uses: &mut [LastUse],
    kind: ResourceKind,
    logical: u32,
    physical: u32,
    desired_access: AccessType,
    desired_usage_bits: u32,
) {
    if physical == INVALID_RESOURCE || physical as usize >= last_uses.len() {
        return;
    }
    let last = &mut last_uses[physical as usize];

    // The slot previously held a different logical resource.
    if last.valid && last.logical != logical {
        ops.push(BarrierOp {
            op_type: BarrierOpType::Aliasing,
            kind,
            logical,
            physical,
            prev_logical: last.logical,
            ..BarrierOp::default()
        });
    }

    if last.valid {
        // What 'transition' means is backend-defined (Vulkan layout change,
        // D3D12 state transition, ...); the compiler only reports the delta.
        let changed = last.usage_bits != desired_usage_bits
            || last.access != desired_access
            || last.domain != PipelineDomain::Any;
        if changed {
            ops.push(BarrierOp {
                op_type: BarrierOpType::Transition,
                kind,
                logical,
                physical,
                src_domain: last.domain,
                dst_domain: PipelineDomain::Any,
                src_access: last.access,
                dst_access: desired_access,
                src_usage_bits: last.usage_bits,
                dst_usage_bits: desired_usage_bits,
                ..BarrierOp::default()
            });
        }

        // Order write -> (read/write) on storage resources.
        if last.access != AccessType::Read && has_storage_usage(kind, desired_usage_bits) {
            ops.push(BarrierOp {
                op_type: BarrierOpType::Uav,
                kind,
                logical,
                physical,
                ..BarrierOp::default()
            });
        }
    }

    last.valid = true;
    last.logical = logical;
    last.access = desired_access;
    last.domain = PipelineDomain::Any;
    last.usage_bits = desired_usage_bits;
}

/// Build the per-pass barrier plan in schedule order.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_plan(
    pass_count: usize,
    schedule: &[PassHandle],
    image_reads: &DependencyList,
    image_writes: &DependencyList,
    buffer_reads: &DependencyList,
    buffer_writes: &DependencyList,
    physical: &PhysicalResourceTable,
    plan: &mut BarrierPlan,
) {
    plan.clear();
    plan.resize_passes(pass_count);

    let mut last_image_use = vec![LastUse::default(); physical.physical_image_count()];
    let mut last_buffer_use = vec![LastUse::default(); physical.physical_buffer_count()];

    let mut scratch: Vec<Vec<BarrierOp>> = vec![Vec::new(); pass_count];
    let mut merged = MergedAccesses::default();

    for pass in schedule {
        let ops = &mut scratch[pass.index()];

        merged.merge(pass.raw(), image_reads, image_writes);
        for slot in 0..merged.logicals.len() {
            let logical = merged.logicals[slot];
            let physical_id = physical
                .image_to_physical
                .get(logical as usize)
                .copied()
                .unwrap_or(INVALID_RESOURCE);
            insert_ops(
                ops,
                &mut last_image_use,
                ResourceKind::Image,
                logical,
                physical_id,
                to_access(merged.reads[slot], merged.writes[slot]),
                merged.usage_bits[slot],
            );
        }

        merged.merge(pass.raw(), buffer_reads, buffer_writes);
        for slot in 0..merged.logicals.len() {
            let logical = merged.logicals[slot];
            let physical_id = physical
                .buffer_to_physical
                .get(logical as usize)
                .copied()
                .unwrap_or(INVALID_RESOURCE);
            insert_ops(
                ops,
                &mut last_buffer_use,
                ResourceKind::Buffer,
                logical,
                physical_id,
                to_access(merged.reads[slot], merged.writes[slot]),
                merged.usage_bits[slot],
            );
        }
    }

    // Flatten scratch into CSR + SoA.
    let mut running = 0u32;
    for pass in 0..pass_count {
        plan.pass_begins[pass] = running;
        plan.pass_lengths[pass] = scratch[pass].len() as u32;
        running += plan.pass_lengths[pass];
    }
    plan.pass_begins[pass_count] = running;
    plan.resize_ops(running as usize);

    for pass in 0..pass_count {
        let base = plan.pass_begins[pass] as usize;
        for (i, op) in scratch[pass].iter().enumerate() {
            plan.store(base + i, op);
        }
    }
}
