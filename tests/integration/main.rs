//! Integration tests for fqsort.
//!
//! These tests validate end-to-end workflows that span multiple modules,
//! from the library sort pipeline up through the CLI binary.

mod test_error_paths;
mod test_sort_command;
