//! Dead pass culling.
//!
//! Reverse BFS from the producers of every declared output's latest version,
//! walking read → producer edges. A pass survives only if it is reachable
//! through that relation; declaring an output without writing it keeps
//! nothing alive, and reads of imported resources (sentinel producers) do
//! not extend liveness.

use std::collections::VecDeque;

use crate::deps::{DependencyList, OutputTable};
use crate::handle::{INVALID_PASS, VersionedHandle};

use super::producer::ProducerIndex;

fn enqueue(pass: u32, pass_count: usize, live: &mut [bool], worklist: &mut VecDeque<u32>) {
    if pass == INVALID_PASS || pass as usize >= pass_count {
        return;
    }
    if !live[pass as usize] {
        live[pass as usize] = true;
        worklist.push_back(pass);
    }
}

fn enqueue_producer(
    versioned: VersionedHandle,
    producers: &ProducerIndex,
    pass_count: usize,
    live: &mut [bool],
    worklist: &mut VecDeque<u32>,
) {
    if versioned.is_invalid() {
        return;
    }
    enqueue(producers.producer_of(versioned), pass_count, live, worklist);
}

/// Mark the passes transitively required by the declared outputs.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mark_live(
    pass_count: usize,
    outputs: &OutputTable,
    image_reads: &DependencyList,
    buffer_reads: &DependencyList,
    image_read_versions: &[VersionedHandle],
    buffer_read_versions: &[VersionedHandle],
    image_producers: &ProducerIndex,
    buffer_producers: &ProducerIndex,
    live: &mut Vec<bool>,
) {
    live.clear();
    live.resize(pass_count, false);

    let mut worklist = VecDeque::new();

    // Seed roots from the latest version of every declared output.
    for &output in &outputs.image_outputs {
        enqueue_producer(image_producers.latest(output), image_producers, pass_count, live, &mut worklist);
    }
    for &output in &outputs.buffer_outputs {
        enqueue_producer(buffer_producers.latest(output), buffer_producers, pass_count, live, &mut worklist);
    }

    // Reverse traversal: a live pass keeps the producers of its reads alive.
    while let Some(pass) = worklist.pop_front() {
        for j in image_reads.range(pass) {
            enqueue_producer(image_read_versions[j], image_producers, pass_count, live, &mut worklist);
        }
        for j in buffer_reads.range(pass) {
            enqueue_producer(buffer_read_versions[j], buffer_producers, pass_count, live, &mut worklist);
        }
    }
}
