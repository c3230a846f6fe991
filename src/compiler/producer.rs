//! Version-to-producer lookup.
//!
//! Flat table answering "which pass wrote version `v` of handle `h`".
//! All versions of a handle occupy a contiguous range:
//!
//! ```text
//! base = offsets[h]
//! producer(h, v) = producers[base + v]
//! version_count(h) = offsets[h + 1] - offsets[h]
//! ```
//!
//! A packed [`VersionedHandle`] is never a valid index; lookups always
//! unpack first.

use crate::deps::DependencyList;
use crate::handle::{INVALID_PASS, VersionedHandle};

/// Producer index for one resource kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProducerIndex {
    pub(crate) offsets: Vec<u32>,
    pub(crate) producers: Vec<u32>,
    pub(crate) latest: Vec<VersionedHandle>,
}

impl ProducerIndex {
    /// Build the index from versioned write records.
    ///
    /// `version_counts` is the per-handle write count computed during
    /// versioning; offsets are its prefix sums.
    pub(crate) fn build(
        &mut self,
        pass_count: usize,
        writes: &DependencyList,
        write_versions: &[VersionedHandle],
        version_counts: &[u32],
    ) {
        let handle_count = version_counts.len();

        self.offsets.clear();
        self.offsets.resize(handle_count + 1, 0);
        self.latest.clear();
        self.latest.resize(handle_count, VersionedHandle::INVALID);

        let mut running = 0u32;
        for handle in 0..handle_count {
            self.offsets[handle] = running;
            let count = version_counts[handle];
            if count > 0 {
                self.latest[handle] = VersionedHandle::pack(handle as u32, count - 1);
            }
            running += count;
        }
        self.offsets[handle_count] = running;

        self.producers.clear();
        self.producers.resize(running as usize, INVALID_PASS);

        for pass in 0..pass_count as u32 {
            for j in writes.range(pass) {
                let versioned = write_versions[j];
                let handle = versioned.resource();
                if handle as usize >= handle_count {
                    continue;
                }
                let base = self.offsets[handle as usize];
                let end = self.offsets[handle as usize + 1];
                let idx = base + versioned.version();
                if idx < end {
                    self.producers[idx as usize] = pass;
                }
            }
        }
    }

    /// The pass that produced the given versioned handle, or
    /// [`INVALID_PASS`] for the sentinel and out-of-range lookups.
    pub fn producer_of(&self, versioned: VersionedHandle) -> u32 {
        if versioned.is_invalid() {
            return INVALID_PASS;
        }
        let handle = versioned.resource() as usize;
        if handle + 1 >= self.offsets.len() {
            return INVALID_PASS;
        }
        let base = self.offsets[handle];
        let end = self.offsets[handle + 1];
        let idx = base + versioned.version();
        if idx >= end {
            return INVALID_PASS;
        }
        self.producers[idx as usize]
    }

    /// The most recent write of a handle, or the sentinel if never written.
    pub fn latest(&self, handle: u32) -> VersionedHandle {
        self.latest
            .get(handle as usize)
            .copied()
            .unwrap_or(VersionedHandle::INVALID)
    }

    /// Number of versions recorded for a handle.
    pub fn version_count(&self, handle: u32) -> u32 {
        let handle = handle as usize;
        if handle + 1 >= self.offsets.len() {
            return 0;
        }
        self.offsets[handle + 1] - self.offsets[handle]
    }

    pub(crate) fn clear(&mut self) {
        self.offsets.clear();
        self.producers.clear();
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::version::VersionedDeps;

    fn write_list(pass_count: usize, per_pass: &[&[u32]]) -> DependencyList {
        let mut list = DependencyList::default();
        list.reset(pass_count);
        for (pass, resources) in per_pass.iter().enumerate() {
            list.mark_begin(pass as u32);
            for &resource in *resources {
                list.push(pass as u32, resource, 0);
            }
        }
        list
    }

    #[test]
    fn test_offsets_are_prefix_sums() {
        // h0 written twice, h1 never, h2 once
        let reads = write_list(2, &[&[], &[]]);
        let writes = write_list(2, &[&[0, 2], &[0]]);
        let mut versions = VersionedDeps::default();
        versions.assign(2, &reads, &writes, 3);

        let mut index = ProducerIndex::default();
        index.build(2, &writes, &versions.writes, &versions.version_counts);

        assert_eq!(index.offsets, vec![0, 2, 2, 3]);
        assert_eq!(index.version_count(0), 2);
        assert_eq!(index.version_count(1), 0);
        assert_eq!(index.version_count(2), 1);
    }

    #[test]
    fn test_producer_lookup() {
        let reads = write_list(3, &[&[], &[], &[]]);
        let writes = write_list(3, &[&[0], &[1], &[0]]);
        let mut versions = VersionedDeps::default();
        versions.assign(3, &reads, &writes, 2);

        let mut index = ProducerIndex::default();
        index.build(3, &writes, &versions.writes, &versions.version_counts);

        assert_eq!(index.producer_of(VersionedHandle::pack(0, 0)), 0);
        assert_eq!(index.producer_of(VersionedHandle::pack(0, 1)), 2);
        assert_eq!(index.producer_of(VersionedHandle::pack(1, 0)), 1);
        // Version past the count and the sentinel both miss.
        assert_eq!(index.producer_of(VersionedHandle::pack(1, 1)), INVALID_PASS);
        assert_eq!(index.producer_of(VersionedHandle::INVALID), INVALID_PASS);
        // Out-of-range handle misses.
        assert_eq!(index.producer_of(VersionedHandle::pack(9, 0)), INVALID_PASS);
    }

    #[test]
    fn test_latest_tracks_newest_version() {
        let reads = write_list(2, &[&[], &[]]);
        let writes = write_list(2, &[&[0], &[0]]);
        let mut versions = VersionedDeps::default();
        versions.assign(2, &reads, &writes, 2);

        let mut index = ProducerIndex::default();
        index.build(2, &writes, &versions.writes, &versions.version_counts);

        assert_eq!(index.latest(0), VersionedHandle::pack(0, 1));
        assert!(index.latest(1).is_invalid());
        assert!(index.latest(42).is_invalid());
    }
}
