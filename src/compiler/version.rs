//! Resource version assignment.
//!
//! The user-facing setup stage records plain handles. This stage derives a
//! versioned view for the compile-time algorithms: every write of a handle
//! bumps that handle's version counter, and every read refers to the last
//! completed write. A read with no prior write gets the sentinel; validation
//! decides later whether that is legal (imported) or fatal.

use crate::deps::DependencyList;
use crate::handle::VersionedHandle;

/// Versioned view over one resource kind's dependency lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct VersionedDeps {
    /// Versioned handle per read entry, parallel to the read list.
    pub reads: Vec<VersionedHandle>,
    /// Versioned handle per write entry, parallel to the write list.
    pub writes: Vec<VersionedHandle>,
    /// Number of versions (writes) per handle.
    pub version_counts: Vec<u32>,
}

impl VersionedDeps {
    pub fn clear(&mut self) {
        self.reads.clear();
        self.writes.clear();
        self.version_counts.clear();
    }

    /// Assign versions by sweeping passes in declaration order.
    ///
    /// Within a pass, reads are resolved before writes, so a pass that reads
    /// and writes the same handle reads the version produced by the previous
    /// pass. Out-of-range write handles get the sentinel and are caught by
    /// validation.
    pub fn assign(&mut self, pass_count: usize, reads: &DependencyList, writes: &DependencyList, handle_count: usize) {
        self.reads.clear();
        self.reads.resize(reads.len(), VersionedHandle::INVALID);
        self.writes.clear();
        self.writes.resize(writes.len(), VersionedHandle::INVALID);
        self.version_counts.clear();
        self.version_counts.resize(handle_count, 0);

        for pass in 0..pass_count as u32 {
            for j in reads.range(pass) {
                let resource = reads.resource(j);
                let next = if (resource as usize) < handle_count {
                    self.version_counts[resource as usize]
                } else {
                    0
                };
                self.reads[j] = if next == 0 {
                    VersionedHandle::INVALID
                } else {
                    VersionedHandle::pack(resource, next - 1)
                };
            }

            for j in writes.range(pass) {
                let resource = writes.resource(j);
                if resource as usize >= handle_count {
                    self.writes[j] = VersionedHandle::INVALID;
                    continue;
                }
                let next = self.version_counts[resource as usize];
                self.writes[j] = VersionedHandle::pack(resource, next);
                self.version_counts[resource as usize] = next + 1;
            }
        }
    }
}
