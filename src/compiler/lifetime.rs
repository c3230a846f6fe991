//! Resource lifetime analysis.
//!
//! Lifetimes are expressed as indices into the scheduled order, not as pass
//! handles: aliasing compares intervals, and only schedule indices are
//! strictly monotonic over execution.

use crate::deps::DependencyList;
use crate::handle::{INVALID_PASS, PassHandle};

/// First/last scheduled use per resource of one kind, indexed by handle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LifetimeTable {
    pub(crate) first_used: Vec<u32>,
    pub(crate) last_used: Vec<u32>,
}

impl LifetimeTable {
    /// The `[first, last]` schedule-index interval of a resource, or `None`
    /// if no scheduled pass touches it.
    pub fn interval(&self, handle: u32) -> Option<(u32, u32)> {
        let first = *self.first_used.get(handle as usize)?;
        if first == INVALID_PASS {
            return None;
        }
        Some((first, self.last_used[handle as usize]))
    }

    pub(crate) fn clear(&mut self) {
        self.first_used.clear();
        self.last_used.clear();
    }
}

/// Compute first/last use of every handle across the scheduled order.
pub(crate) fn analyze(
    schedule: &[PassHandle],
    order_index: &[u32],
    reads: &DependencyList,
    writes: &DependencyList,
    handle_count: usize,
    lifetimes: &mut LifetimeTable,
) {
    lifetimes.first_used.clear();
    lifetimes.first_used.resize(handle_count, INVALID_PASS);
    lifetimes.last_used.clear();
    lifetimes.last_used.resize(handle_count, 0);

    let touch = |first_used: &mut Vec<u32>, last_used: &mut Vec<u32>, handle: u32, order: u32| {
        if handle as usize >= handle_count {
            return;
        }
        if first_used[handle as usize] == INVALID_PASS {
            first_used[handle as usize] = order;
        }
        last_used[handle as usize] = order;
    };

    for pass in schedule {
        let order = order_index[pass.index()];
        for j in reads.range(pass.raw()) {
            touch(&mut lifetimes.first_used, &mut lifetimes.last_used, reads.resource(j), order);
        }
        for j in writes.range(pass.raw()) {
            touch(&mut lifetimes.first_used, &mut lifetimes.last_used, writes.resource(j), order);
        }
    }
}
