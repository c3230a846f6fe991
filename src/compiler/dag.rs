//! DAG construction over live passes.
//!
//! Edges run producer → consumer and come from read records only: a write
//! that overwrites an earlier version introduces no edge unless somebody
//! reads the new version. Per-producer adjacency is sorted and deduplicated
//! so a consumer reading the same resource several times counts once, then
//! flattened into CSR form.

use std::collections::VecDeque;

use crate::deps::DependencyList;
use crate::error::CompileError;
use crate::handle::{INVALID_PASS, PassHandle, VersionedHandle};

use super::producer::ProducerIndex;

/// Pass dependency graph in CSR form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectedAcyclicGraph {
    pub(crate) adjacency: Vec<u32>,
    pub(crate) adjacency_begins: Vec<u32>,
    pub(crate) in_degrees: Vec<u32>,
    pub(crate) out_degrees: Vec<u32>,
}

impl DirectedAcyclicGraph {
    /// Number of passes the graph was built over.
    pub fn pass_count(&self) -> usize {
        self.in_degrees.len()
    }

    /// Successors (consumers) of a pass.
    pub fn successors(&self, pass: PassHandle) -> impl Iterator<Item = PassHandle> + '_ {
        let begin = self.adjacency_begins[pass.index()] as usize;
        let end = self.adjacency_begins[pass.index() + 1] as usize;
        self.adjacency[begin..end].iter().map(|&p| PassHandle::new(p))
    }

    /// Number of producers feeding a pass.
    pub fn in_degree(&self, pass: PassHandle) -> u32 {
        self.in_degrees[pass.index()]
    }

    /// Number of consumers fed by a pass.
    pub fn out_degree(&self, pass: PassHandle) -> u32 {
        self.out_degrees[pass.index()]
    }

    pub(crate) fn clear(&mut self) {
        self.adjacency.clear();
        self.adjacency_begins.clear();
        self.in_degrees.clear();
        self.out_degrees.clear();
    }
}

fn add_edge(outgoing: &mut [Vec<u32>], live: &[bool], from: u32, to: u32) {
    let pass_count = outgoing.len();
    if from == INVALID_PASS || to == INVALID_PASS {
        return;
    }
    if from as usize >= pass_count || to as usize >= pass_count {
        return;
    }
    if from == to {
        return;
    }
    if !live[from as usize] || !live[to as usize] {
        return;
    }
    outgoing[from as usize].push(to);
}

/// Build the producer → consumer DAG over live passes.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build(
    dag: &mut DirectedAcyclicGraph,
    pass_count: usize,
    live: &[bool],
    image_reads: &DependencyList,
    buffer_reads: &DependencyList,
    image_read_versions: &[VersionedHandle],
    buffer_read_versions: &[VersionedHandle],
    image_producers: &ProducerIndex,
    buffer_producers: &ProducerIndex,
) {
    let mut outgoing: Vec<Vec<u32>> = vec![Vec::new(); pass_count];

    for consumer in 0..pass_count as u32 {
        if !live[consumer as usize] {
            continue;
        }
        for j in image_reads.range(consumer) {
            add_edge(&mut outgoing, live, image_producers.producer_of(image_read_versions[j]), consumer);
        }
        for j in buffer_reads.range(consumer) {
            add_edge(&mut outgoing, live, buffer_producers.producer_of(buffer_read_versions[j]), consumer);
        }
    }

    // De-duplicate per producer and recompute degrees.
    for list in &mut outgoing {
        list.sort_unstable();
        list.dedup();
    }

    dag.clear();
    dag.adjacency_begins.resize(pass_count + 1, 0);
    dag.in_degrees.resize(pass_count, 0);
    dag.out_degrees.resize(pass_count, 0);

    for (from, list) in outgoing.iter().enumerate() {
        dag.out_degrees[from] = list.len() as u32;
        for &to in list {
            dag.in_degrees[to as usize] += 1;
        }
    }

    let mut running = 0u32;
    for (from, list) in outgoing.iter().enumerate() {
        dag.adjacency_begins[from] = running;
        dag.adjacency.extend_from_slice(list);
        running = dag.adjacency.len() as u32;
    }
    dag.adjacency_begins[pass_count] = running;
}

/// Verify that the live subgraph is acyclic.
///
/// Standalone Kahn sweep over an already-built DAG; also checks the array
/// shapes against the liveness table. Useful for debug validation of a plan
/// that was constructed or modified outside [`compile`](crate::RenderGraphSystem::compile).
pub fn check_acyclic(dag: &DirectedAcyclicGraph, live: &[bool]) -> Result<(), CompileError> {
    let pass_count = live.len();
    if dag.in_degrees.len() != pass_count || dag.adjacency_begins.len() != pass_count + 1 {
        return Err(CompileError::DagShapeMismatch);
    }

    let mut in_degrees = dag.in_degrees.clone();
    let mut queue: VecDeque<u32> = (0..pass_count as u32)
        .filter(|&pass| live[pass as usize] && in_degrees[pass as usize] == 0)
        .collect();

    let mut visited = 0usize;
    while let Some(pass) = queue.pop_front() {
        visited += 1;
        let begin = dag.adjacency_begins[pass as usize] as usize;
        let end = dag.adjacency_begins[pass as usize + 1] as usize;
        for &next in &dag.adjacency[begin..end] {
            if !live[next as usize] {
                continue;
            }
            in_degrees[next as usize] -= 1;
            if in_degrees[next as usize] == 0 {
                queue.push_back(next);
            }
        }
    }

    let live_count = live.iter().filter(|&&flag| flag).count();
    if visited != live_count {
        return Err(CompileError::CyclicDependency);
    }
    Ok(())
}
