/// Configuration system for bribemap.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::BribemapConfig::default()`]
/// 2. **User global config**: `~/.bribemap/config.toml`
/// 3. **Project local config**: `.bribemap.toml` in the current directory
/// 4. **Environment variables**: `BRIBEMAP_*` overrides (highest precedence)
///
/// Later layers override earlier ones key by key: a file that only sets
/// `[api] base_url` leaves every other value from the previous layer alone.
///
/// # Usage
///
/// ```rust,ignore
/// let cfg = bribemap::config::load();
/// let client = bribemap::api::ApiClient::from_config(&cfg.api);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::BribemapConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars.
pub fn load() -> BribemapConfig {
    let paths: Vec<PathBuf> = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();
    let mut config = load_layers(&paths);
    apply_env_overrides(&mut config);
    config
}

/// Merge the given TOML files over the defaults, in order.
///
/// A file that is unreadable, malformed, or holds a value of the wrong type
/// is skipped whole; the layers before it still apply.
fn load_layers(paths: &[PathBuf]) -> BribemapConfig {
    let Ok(mut layered) = toml::Value::try_from(BribemapConfig::default()) else {
        return BribemapConfig::default();
    };

    for path in paths {
        if let Some(overlay) = load_toml_value(path) {
            merge_values(&mut layered, overlay);
        }
    }

    layered.try_into().unwrap_or_default()
}

/// Read a TOML file as an untyped value tree, if it fits the schema.
fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    value.clone().try_into::<BribemapConfig>().ok()?;
    Some(value)
}

/// Recursively overlay `overlay` onto `base`.
///
/// Tables merge key by key; any other value replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.bribemap/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bribemap").join("config.toml"))
}

/// Path to the project local config: `.bribemap.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".bribemap.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BRIBEMAP_API_URL`: backend base URL
/// - `BRIBEMAP_TIMEOUT_MS`: request timeout
/// - `BRIBEMAP_TOPOLOGY_URL`: map geometry file
/// - `BRIBEMAP_PAGE_SIZE`: explore grid page size
/// - `BRIBEMAP_WEB_ADDR`: dashboard bind address
/// - `BRIBEMAP_LOGGING`: diagnostics log on/off
/// - `NO_COLOR`: disable ANSI colors
fn apply_env_overrides(config: &mut BribemapConfig) {
    if let Ok(val) = std::env::var("BRIBEMAP_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("BRIBEMAP_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("BRIBEMAP_TOPOLOGY_URL")
        && !val.is_empty()
    {
        config.api.topology_url = val;
    }
    if let Ok(val) = std::env::var("BRIBEMAP_PAGE_SIZE")
        && let Ok(size) = val.parse::<usize>()
        && size > 0
    {
        config.display.page_size = size;
    }
    if let Ok(val) = std::env::var("BRIBEMAP_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("BRIBEMAP_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if std::env::var_os("NO_COLOR").is_some() {
        config.display.color = false;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.bribemap/config.toml`.
///
/// Returns an error if the file already exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.bribemap/ directory")?;
    }

    fs::write(&path, BribemapConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key in the global config file.
///
/// Supports dotted keys like `api.base_url`. Creates the file from defaults
/// when it does not exist yet.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        BribemapConfig::default_toml()
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that no longer deserialize into the schema.
    let _: BribemapConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Array(_)) => {
            let items = raw_value
                .split(',')
                .map(|s| {
                    let s = s.trim();
                    s.parse::<i64>()
                        .map(toml::Value::Integer)
                        .unwrap_or_else(|_| toml::Value::String(s.to_string()))
                })
                .collect();
            toml::Value::Array(items)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert((*leaf).to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
