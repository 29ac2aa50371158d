//! Error path integration tests.
//!
//! These verify failure behavior across module boundaries: what the sorter
//! leaves on disk, which error variant surfaces, and that a failed sorter
//! stays failed.

use crate::helpers::{fastq_bytes, write_fastq};
use fqsort_lib::errors::FqsortError;
use fqsort_lib::sort::{FastqSorter, SortState};
use tempfile::TempDir;

#[test]
fn test_directory_input_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();

    let mut sorter = FastqSorter::new(temp_dir.path());
    let err = sorter.sort().unwrap_err();
    match &err {
        FqsortError::Io { reason, .. } => {
            assert!(reason.contains("is a directory"), "reason: {reason}");
        }
        other => panic!("expected io error, got {other:?}"),
    }
    assert_eq!(sorter.state(), SortState::Failed);
}

#[test]
fn test_mid_stream_parse_failure_leaves_spilled_batches() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    // Four good records followed by garbage: with batch size 2, two batches
    // spill before the parse error hits.
    let mut content = fastq_bytes(&[
        ("r1", "ACGT", "IIII"),
        ("r2", "ACGT", "IIII"),
        ("r3", "ACGT", "IIII"),
        ("r4", "ACGT", "IIII"),
    ]);
    content.extend_from_slice(b"garbage without an at sign\n");
    std::fs::write(&input, content).unwrap();

    let mut sorter = FastqSorter::new(&input).batch_size(2);
    let err = sorter.sort().unwrap_err();
    assert!(matches!(err, FqsortError::Format { .. }), "got {err:?}");
    assert_eq!(sorter.state(), SortState::Failed);

    // Completed batches stay on disk for inspection; no output was written.
    assert!(temp_dir.path().join("reads_batch1.fastq").exists());
    assert!(temp_dir.path().join("reads_batch2.fastq").exists());
    assert!(!temp_dir.path().join("reads_sorted.fastq").exists());

    // The sorter cannot be rerun after the failure.
    let err = sorter.sort().unwrap_err();
    assert!(matches!(err, FqsortError::InvalidState { .. }), "got {err:?}");
}

#[test]
fn test_early_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    std::fs::write(&input, b"not fastq\n").unwrap();

    let mut sorter = FastqSorter::new(&input);
    let err = sorter.sort().unwrap_err();
    assert!(matches!(err, FqsortError::Format { .. }), "got {err:?}");

    let entries: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["reads.fastq"], "nothing but the input should exist");
}

#[test]
fn test_squatted_output_path_fails_the_merge_but_keeps_batches() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    write_fastq(&input, &[("r2", "ACGT", "IIII"), ("r1", "ACGT", "IIII")]);
    // A directory on the output path makes the final create fail after the
    // batch phase succeeded.
    std::fs::create_dir(temp_dir.path().join("reads_sorted.fastq")).unwrap();

    let mut sorter = FastqSorter::new(&input).batch_size(1);
    let err = sorter.sort().unwrap_err();
    match &err {
        FqsortError::Io { path, reason } => {
            assert!(path.ends_with("reads_sorted.fastq"), "path: {path}");
            assert!(reason.contains("is a directory"), "reason: {reason}");
        }
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(temp_dir.path().join("reads_batch1.fastq").exists());
    assert!(temp_dir.path().join("reads_batch2.fastq").exists());
}
