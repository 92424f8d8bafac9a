use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::config;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Failure entry (JSONL)
// ---------------------------------------------------------------------------

/// One line in the diagnostics log (`~/.bribemap/diagnostics.jsonl`).
///
/// Each entry records a failed backend or topology call. Read back by the
/// reporter for `bribemap diagnostics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub timestamp: String,
    /// Client operation name, e.g. `"summary_stats"`.
    pub operation: String,
    /// Endpoint path template or URL.
    pub endpoint: String,
    /// `network`, `server`, `validation`, `parse` or `invalid-input`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    pub message: String,
}

impl FailureEntry {
    pub fn new(operation: &str, endpoint: &str, err: &ApiError) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            operation: operation.to_string(),
            endpoint: endpoint.to_string(),
            kind: err.kind().to_string(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Where failures go: a stderr line, a JSONL file, both or neither.
///
/// Best-effort: a failure to write the log never surfaces to the caller.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    console: bool,
    path: Option<PathBuf>,
}

impl Diagnostics {
    /// Record nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(console: bool, path: Option<PathBuf>) -> Self {
        Self { console, path }
    }

    /// Build from the resolved `[logging]` section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            config::expand_home(&config.path)
        } else {
            None
        };
        Self::new(config.console, path)
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a failed call.
    pub fn record(&self, operation: &str, endpoint: &str, err: &ApiError) {
        if self.console {
            eprintln!(
                "{} {} {}",
                "bribemap:".red().bold(),
                operation.bold(),
                err.to_string().dimmed()
            );
        }

        if let Some(path) = &self.path {
            let entry = FailureEntry::new(operation, endpoint, err);
            let _ = append_entry(path, &entry);
        }
    }
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read all entries from a diagnostics log.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<FailureEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<FailureEntry>(&line).ok())
        .collect()
}

/// Read entries from the last `days` days; all entries when `None`.
pub fn read_entries_since_days(path: &Path, days: Option<u32>) -> Vec<FailureEntry> {
    let entries = read_all_entries(path);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    entries
        .into_iter()
        .filter(|e| {
            chrono::DateTime::parse_from_rfc3339(&e.timestamp)
                .map(|ts| ts >= cutoff)
                .unwrap_or(false)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_entry(path: &Path, entry: &FailureEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Delete the log, returning how many entries it held.
///
/// A missing log counts as already clear.
pub fn clear_log(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    let removed = read_all_entries(path).len();
    fs::remove_file(path)?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bribemap-diag-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("diagnostics.jsonl")
    }

    #[test]
    fn record_appends_jsonl_lines() {
        let path = temp_log("append");
        let diagnostics = Diagnostics::new(false, Some(path.clone()));

        diagnostics.record(
            "heatmap",
            "/v1/stats/heatmap",
            &ApiError::Network {
                message: "connection refused".to_string(),
            },
        );
        diagnostics.record(
            "create_report",
            "/v1/reports",
            &ApiError::from_response(400, r#"{"error":"bad","details":[]}"#),
        );

        let entries = read_all_entries(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, "network");
        assert_eq!(entries[1].status, Some(400));
        assert_eq!(entries[1].operation, "create_report");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_log_reads_empty() {
        let path = temp_log("missing");
        assert!(read_all_entries(&path).is_empty());
        assert!(read_entries_since_days(&path, Some(1)).is_empty());
    }

    #[test]
    fn disabled_logging_has_no_path() {
        let config = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(Diagnostics::from_config(&config).log_path().is_none());
    }

    #[test]
    fn clear_removes_log_and_counts_entries() {
        let path = temp_log("clear");
        let diagnostics = Diagnostics::new(false, Some(path.clone()));
        let err = ApiError::Parse {
            message: "expected value".to_string(),
        };
        diagnostics.record("summary_stats", "/v1/stats/summary", &err);
        diagnostics.record("heatmap", "/v1/stats/heatmap", &err);

        assert_eq!(clear_log(&path).unwrap(), 2);
        assert!(!path.exists());
        assert!(read_all_entries(&path).is_empty());
        assert_eq!(clear_log(&path).unwrap(), 0);

        diagnostics.record("heatmap", "/v1/stats/heatmap", &err);
        assert_eq!(read_all_entries(&path).len(), 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
