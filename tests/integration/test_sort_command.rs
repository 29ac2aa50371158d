//! Integration tests for the sort command.
//!
//! These run the compiled `fqsort` binary against real files, checking exit
//! codes, output placement and the sorted result.

use crate::helpers::{read_names, scrambled_records, sorted_names, write_fastq, write_fastq_gz};
use std::process::Command;
use tempfile::TempDir;

/// Runs `fqsort sort` with the given trailing arguments.
fn run_sort(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fqsort"))
        .arg("sort")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run fqsort")
}

#[test]
fn test_sort_command_sorts_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    write_fastq(&input, &scrambled_records(20));

    let output = run_sort(&[input.to_str().unwrap(), "--batch-size", "5"]);
    assert!(
        output.status.success(),
        "sort command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let sorted = temp_dir.path().join("reads_sorted.fastq");
    assert!(sorted.exists(), "sorted output not created");
    assert_eq!(read_names(&sorted), sorted_names(20));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Sort complete"), "stderr: {stderr}");
    assert!(stderr.contains("=== Summary ==="), "stderr: {stderr}");
}

#[test]
fn test_sort_command_gzipped_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq.gz");
    write_fastq_gz(&input, &scrambled_records(10));

    let output = run_sort(&[input.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "sort command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Output is plain even though the input was gzipped.
    let sorted = temp_dir.path().join("reads_sorted.fastq");
    assert_eq!(read_names(&sorted), sorted_names(10));
}

#[test]
fn test_sort_command_directory_recursive_with_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    let nested = data.join("nested");
    std::fs::create_dir_all(&nested).unwrap();
    let out = temp_dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    write_fastq(&data.join("a.fastq"), &[("z1", "ACGT", "IIII"), ("a1", "ACGT", "IIII")]);
    write_fastq(&nested.join("b.fastq"), &[("m2", "CCGG", "JJJJ"), ("b2", "CCGG", "JJJJ")]);
    std::fs::write(data.join("ignored.txt"), b"not fastq").unwrap();

    let output =
        run_sort(&[data.to_str().unwrap(), "--recursive", "-o", out.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "sort command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(read_names(&out.join("a_sorted.fastq")), vec!["a1", "z1"]);
    assert_eq!(read_names(&out.join("b_sorted.fastq")), vec!["b2", "m2"]);
    assert!(!out.join("ignored_sorted.txt").exists());
    // Nothing written into the searched tree.
    assert!(!data.join("a_sorted.fastq").exists());
    assert!(!nested.join("b_sorted.fastq").exists());
}

#[test]
fn test_sort_command_without_recursion_skips_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    let nested = data.join("nested");
    std::fs::create_dir_all(&nested).unwrap();

    write_fastq(&data.join("top.fastq"), &[("r1", "A", "I")]);
    write_fastq(&nested.join("deep.fastq"), &[("r2", "C", "I")]);

    let output = run_sort(&[data.to_str().unwrap()]);
    assert!(output.status.success());

    assert!(data.join("top_sorted.fastq").exists());
    assert!(!nested.join("deep_sorted.fastq").exists());
}

#[test]
fn test_sort_command_rejects_missing_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    write_fastq(&input, &[("r1", "A", "I")]);
    let missing = temp_dir.path().join("no_such_dir");

    let output = run_sort(&[input.to_str().unwrap(), "-o", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(!missing.exists(), "output dir must not be created implicitly");
}

#[test]
fn test_sort_command_rejects_zero_batch_size() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    write_fastq(&input, &[("r1", "A", "I")]);

    let output = run_sort(&[input.to_str().unwrap(), "--batch-size", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "stderr: {stderr}");
}

#[test]
fn test_sort_command_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("gone.fastq");

    let output = run_sort(&[input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a file or directory"), "stderr: {stderr}");
}

#[test]
fn test_sort_command_malformed_input_reports_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.fastq");
    std::fs::write(&input, b"this is not fastq at all\n").unwrap();

    let output = run_sort(&[input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid FASTQ"), "stderr: {stderr}");
}

#[test]
fn test_sort_command_help_documents_flags() {
    let output = run_sort(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--output-dir", "--batch-size", "--qual-scale", "--recursive", "--max-files"] {
        assert!(stdout.contains(flag), "help missing {flag}:\n{stdout}");
    }
}
