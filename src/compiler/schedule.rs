//! Topological scheduling.
//!
//! Kahn's algorithm over the live DAG. The ready queue is seeded in pass
//! declaration order and drained FIFO, so the tie-break among ready passes
//! is declaration order and the schedule is deterministic for a given graph.

use std::collections::VecDeque;

use crate::error::CompileError;
use crate::handle::{INVALID_PASS, PassHandle};

use super::dag::DirectedAcyclicGraph;

/// Compute the execution order of live passes.
///
/// Fails with [`CompileError::CyclicDependency`] when the sweep visits fewer
/// passes than are live.
pub(crate) fn topological_order(
    dag: &DirectedAcyclicGraph,
    live: &[bool],
    schedule: &mut Vec<PassHandle>,
    in_degree_scratch: &mut Vec<u32>,
) -> Result<(), CompileError> {
    let pass_count = live.len();
    schedule.clear();
    schedule.reserve(pass_count);

    in_degree_scratch.clear();
    in_degree_scratch.extend_from_slice(&dag.in_degrees);

    let mut queue: VecDeque<u32> = (0..pass_count as u32)
        .filter(|&pass| live[pass as usize] && in_degree_scratch[pass as usize] == 0)
        .collect();

    while let Some(pass) = queue.pop_front() {
        schedule.push(PassHandle::new(pass));

        let begin = dag.adjacency_begins[pass as usize] as usize;
        let end = dag.adjacency_begins[pass as usize + 1] as usize;
        for &next in &dag.adjacency[begin..end] {
            in_degree_scratch[next as usize] -= 1;
            if in_degree_scratch[next as usize] == 0 {
                queue.push_back(next);
            }
        }
    }

    let live_count = live.iter().filter(|&&flag| flag).count();
    if schedule.len() != live_count {
        schedule.clear();
        return Err(CompileError::CyclicDependency);
    }
    Ok(())
}

/// Invert the schedule into a pass → order-index map.
///
/// Unscheduled (culled) passes keep [`INVALID_PASS`].
pub(crate) fn build_order_index(schedule: &[PassHandle], pass_count: usize, order_index: &mut Vec<u32>) {
    order_index.clear();
    order_index.resize(pass_count, INVALID_PASS);
    for (order, pass) in schedule.iter().enumerate() {
        order_index[pass.index()] = order as u32;
    }
}
