//! CLI command implementations for fqsort.
//!
//! Each submodule implements one subcommand; [`command`] defines the shared
//! [`Command`](command::Command) trait they dispatch through.

// Blanket clippy pedantic allows for command implementations.
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod sort;
