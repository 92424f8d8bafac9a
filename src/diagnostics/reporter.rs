//! Diagnostics reporter: per-operation failure summary.
//!
//! Reads the JSONL diagnostics log and groups failures by client operation,
//! most frequent first.

use std::collections::HashMap;
use std::path::Path;

use super::logger::{self, FailureEntry};

/// Failure summary for `bribemap diagnostics`.
#[derive(Debug, Default)]
pub struct FailureReport {
    pub total_failures: usize,
    pub kinds: KindDistribution,
    pub operations: Vec<OperationFailures>,
}

/// Failures of one client operation.
#[derive(Debug, Clone)]
pub struct OperationFailures {
    pub operation: String,
    pub count: usize,
    /// Most common failure kind for this operation.
    pub primary_kind: String,
    pub last_timestamp: String,
    pub last_message: String,
}

/// Distribution across failure kinds.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KindDistribution {
    pub network: usize,
    pub server: usize,
    pub validation: usize,
    pub other: usize,
}

impl KindDistribution {
    pub fn total(&self) -> usize {
        self.network + self.server + self.validation + self.other
    }

    /// Percentage for a given count, 0.0 when there is nothing recorded.
    pub fn pct(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }
}

/// Summarize the log at `path`, optionally limited to the last `days` days.
pub fn compute_report(path: &Path, days: Option<u32>) -> FailureReport {
    let entries = logger::read_entries_since_days(path, days);
    build_report(&entries)
}

fn build_report(entries: &[FailureEntry]) -> FailureReport {
    if entries.is_empty() {
        return FailureReport::default();
    }

    let mut kinds = KindDistribution::default();
    for entry in entries {
        match entry.kind.as_str() {
            "network" => kinds.network += 1,
            "server" => kinds.server += 1,
            "validation" => kinds.validation += 1,
            _ => kinds.other += 1,
        }
    }

    FailureReport {
        total_failures: entries.len(),
        kinds,
        operations: group_by_operation(entries),
    }
}

fn group_by_operation(entries: &[FailureEntry]) -> Vec<OperationFailures> {
    let mut groups: HashMap<&str, Vec<&FailureEntry>> = HashMap::new();
    for entry in entries {
        groups.entry(entry.operation.as_str()).or_default().push(entry);
    }

    let mut operations: Vec<OperationFailures> = groups
        .into_iter()
        .map(|(operation, group)| {
            let mut kind_counts: HashMap<&str, usize> = HashMap::new();
            for e in &group {
                *kind_counts.entry(e.kind.as_str()).or_default() += 1;
            }
            let primary_kind = kind_counts
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(kind, _)| kind.to_string())
                .unwrap_or_default();

            // Log lines are appended in time order.
            let last = group[group.len() - 1];

            OperationFailures {
                operation: operation.to_string(),
                count: group.len(),
                primary_kind,
                last_timestamp: last.timestamp.clone(),
                last_message: last.message.clone(),
            }
        })
        .collect();

    operations.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.operation.cmp(&b.operation)));
    operations
}
