/// Configuration schema and defaults for bribemap.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[api]`, `[display]`, `[form]`, `[web]`, and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

/// Default backend base URL when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Static TopoJSON file with the Indian state geometries.
pub const DEFAULT_TOPOLOGY_URL: &str = "https://raw.githubusercontent.com/Anujarya300/bubble_maps/master/data/geography-data/india.topo.json";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level bribemap configuration.
///
/// Maps directly to `~/.bribemap/config.toml` and `.bribemap.toml`. All
/// sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BribemapConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub form: FormConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the reports API. Overridden by `BRIBEMAP_API_URL`.
    pub base_url: String,
    /// Fixed per-request timeout (milliseconds).
    pub timeout_ms: u64,
    /// URL of the third-party TopoJSON file used for map geometry.
    pub topology_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: 10_000,
            topology_url: DEFAULT_TOPOLOGY_URL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

/// Table and terminal rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per page in the explore grid.
    pub page_size: usize,
    /// Page sizes offered by the grid's page-size selector.
    pub page_size_options: Vec<usize>,
    /// Width (characters) of the heatmap / chart bars.
    pub bar_width: usize,
    /// Whether terminal output uses ANSI colors.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            page_size_options: vec![20, 50, 100],
            bar_width: 30,
            color: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [form]
// ---------------------------------------------------------------------------

/// Submission form settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the success indicator stays up before reverting to idle.
    pub success_display_secs: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            success_display_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `bribemap web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Failure diagnostics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append failures to the JSONL diagnostics log.
    pub enabled: bool,
    /// Print a one-line diagnostic to stderr on failure.
    pub console: bool,
    /// Path to the diagnostics log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            console: true,
            path: "~/.bribemap/diagnostics.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML
// ---------------------------------------------------------------------------

impl BribemapConfig {
    /// The annotated config written by `bribemap config init`.
    pub fn default_toml() -> String {
        r#"# bribemap configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BRIBEMAP_*)
#   2. Project config (.bribemap.toml in current directory)
#   3. User global config (~/.bribemap/config.toml)
#   4. Built-in defaults

[api]
base_url = "http://localhost:3000"   # or BRIBEMAP_API_URL
timeout_ms = 10000
topology_url = "https://raw.githubusercontent.com/Anujarya300/bubble_maps/master/data/geography-data/india.topo.json"

[display]
page_size = 20
page_size_options = [20, 50, 100]
bar_width = 30
color = true

[form]
success_display_secs = 5

[web]
addr = "127.0.0.1:9747"
open_browser = true

[logging]
enabled = true
console = true
path = "~/.bribemap/diagnostics.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
