//! Failure diagnostics.
//!
//! Every failed API or topology call prints a one-line console diagnostic
//! and appends a JSONL record to `~/.bribemap/diagnostics.jsonl`. The log is
//! summarized by `bribemap diagnostics`.

pub mod logger;
pub mod reporter;

pub use logger::{Diagnostics, FailureEntry};
