//! Fail-fast graph validation.
//!
//! Runs over live passes only, after culling. Every failure is fatal for the
//! current compile:
//!
//! - no outputs declared at all
//! - read/write handles beyond the meta table size
//! - reads of non-imported resources with no recorded producer
//!
//! A sentinel read on an imported resource is the one legal exception; the
//! external binding supplies the contents.

use crate::barrier::ResourceKind;
use crate::deps::{DependencyList, OutputTable};
use crate::error::CompileError;
use crate::handle::{INVALID_PASS, VersionedHandle};

use super::producer::ProducerIndex;

#[allow(clippy::too_many_arguments)]
fn validate_kind(
    kind: ResourceKind,
    pass_count: usize,
    live: &[bool],
    reads: &DependencyList,
    writes: &DependencyList,
    read_versions: &[VersionedHandle],
    write_versions: &[VersionedHandle],
    producers: &ProducerIndex,
    imported: &[bool],
) -> Result<(), CompileError> {
    let handle_count = imported.len();

    for pass in 0..pass_count as u32 {
        if !live[pass as usize] {
            continue;
        }

        for j in reads.range(pass) {
            let handle = reads.resource(j);
            if handle as usize >= handle_count {
                return Err(CompileError::ReadOutOfRange { kind, pass, handle });
            }

            let versioned = read_versions[j];
            if imported[handle as usize] {
                continue;
            }
            if versioned.is_invalid() || producers.producer_of(versioned) == INVALID_PASS {
                return Err(CompileError::ReadBeforeWrite { kind, pass, handle });
            }
        }

        for j in writes.range(pass) {
            let handle = writes.resource(j);
            if handle as usize >= handle_count || write_versions[j].is_invalid() {
                return Err(CompileError::WriteOutOfRange { kind, pass, handle });
            }
        }
    }

    Ok(())
}

/// Validate the captured graph. Executed on live passes only.
#[allow(clippy::too_many_arguments)]
pub(crate) fn validate(
    pass_count: usize,
    live: &[bool],
    outputs: &OutputTable,
    image_reads: &DependencyList,
    image_writes: &DependencyList,
    buffer_reads: &DependencyList,
    buffer_writes: &DependencyList,
    image_read_versions: &[VersionedHandle],
    image_write_versions: &[VersionedHandle],
    buffer_read_versions: &[VersionedHandle],
    buffer_write_versions: &[VersionedHandle],
    image_producers: &ProducerIndex,
    buffer_producers: &ProducerIndex,
    image_imported: &[bool],
    buffer_imported: &[bool],
) -> Result<(), CompileError> {
    if outputs.is_empty() {
        return Err(CompileError::NoOutputsDeclared);
    }

    validate_kind(
        ResourceKind::Image,
        pass_count,
        live,
        image_reads,
        image_writes,
        image_read_versions,
        image_write_versions,
        image_producers,
        image_imported,
    )?;
    validate_kind(
        ResourceKind::Buffer,
        pass_count,
        live,
        buffer_reads,
        buffer_writes,
        buffer_read_versions,
        buffer_write_versions,
        buffer_producers,
        buffer_imported,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::version::VersionedDeps;

    fn list(pass_count: usize, per_pass: &[&[u32]]) -> DependencyList {
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

    fn check(
        reads: &[&[u32]],
        writes: &[&[u32]],
        imported: &[bool],
        live: &[bool],
    ) -> Result<(), CompileError> {
        let pass_count = reads.len();
        let read_list = list(pass_count, reads);
        let write_list = list(pass_count, writes);
        let empty = list(pass_count, &vec![&[] as &[u32]; pass_count]);

        let mut versions = VersionedDeps::default();
        versions.assign(pass_count, &read_list, &write_list, imported.len());
        let mut producers = ProducerIndex::default();
        producers.build(pass_count, &write_list, &versions.writes, &versions.version_counts);

        let outputs = OutputTable {
            image_outputs: vec![0],
            buffer_outputs: Vec::new(),
        };
        let no_versions = VersionedDeps::default();
        let no_producers = ProducerIndex::default();

        validate(
            pass_count,
            live,
            &outputs,
            &read_list,
            &write_list,
            &empty,
            &empty,
            &versions.reads,
            &versions.writes,
            &no_versions.reads,
            &no_versions.writes,
            &producers,
            &no_producers,
            imported,
            &[],
        )
    }

    #[test]
    fn test_no_outputs_is_fatal() {
        let outputs = OutputTable::default();
        let empty = list(0, &[]);
        let result = validate(
            0,
            &[],
            &outputs,
            &empty,
            &empty,
            &empty,
            &empty,
            &[],
            &[],
            &[],
            &[],
            &ProducerIndex::default(),
            &ProducerIndex::default(),
            &[],
            &[],
        );
        assert_eq!(result, Err(CompileError::NoOutputsDeclared));
    }

    #[test]
    fn test_write_then_read_passes() {
        assert_eq!(check(&[&[], &[0]], &[&[0], &[]], &[false], &[true, true]), Ok(()));
    }

    #[test]
    fn test_read_before_write_is_fatal_for_transient() {
        let result = check(&[&[0]], &[&[]], &[false], &[true]);
        assert_eq!(
            result,
            Err(CompileError::ReadBeforeWrite {
                kind: ResourceKind::Image,
                pass: 0,
                handle: 0,
            })
        );
    }

    #[test]
    fn test_read_without_producer_is_legal_for_imported() {
        assert_eq!(check(&[&[0]], &[&[]], &[true], &[true]), Ok(()));
    }

    #[test]
    fn test_out_of_range_read_is_fatal() {
        let result = check(&[&[123_456]], &[&[]], &[false], &[true]);
        assert_eq!(
            result,
            Err(CompileError::ReadOutOfRange {
                kind: ResourceKind::Image,
                pass: 0,
                handle: 123_456,
            })
        );
    }

    #[test]
    fn test_out_of_range_write_is_fatal() {
        let result = check(&[&[]], &[&[5]], &[false], &[true]);
        assert_eq!(
            result,
            Err(CompileError::WriteOutOfRange {
                kind: ResourceKind::Image,
                pass: 0,
                handle: 5,
            })
        );
    }

    #[test]
    fn test_culled_passes_are_not_validated() {
        // The offending read sits in a dead pass.
        assert_eq!(check(&[&[0]], &[&[]], &[false], &[false]), Ok(()));
    }
}
