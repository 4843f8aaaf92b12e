//! Configuration file loading for mendcheck.
//!
//! Discovers and loads `mendcheck.toml` from the working directory, or reads
//! the file named by `--config`. CLI arguments take precedence over the file.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use mendcheck_core::ErrorKind;
use mendcheck_stock::{RepairSpec, RuleSpec};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "mendcheck.toml";

/// Top-level configuration from mendcheck.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MendcheckConfig {
    /// Kind carried by the aggregate error when the run fails.
    pub error_kind: Option<String>,

    /// Bindings in registration order.
    pub rules: Vec<RuleEntry>,
}

/// One `[[rules]]` table: a stock rule plus an optional repair.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    #[serde(flatten)]
    pub rule: RuleSpec,

    #[serde(default)]
    pub repair: Option<RepairSpec>,
}

/// Discover the mendcheck.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a mendcheck.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<MendcheckConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<MendcheckConfig> {
    let config: MendcheckConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config path if given, else discover one in `dir`,
/// else fall back to an empty rule set.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<MendcheckConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(MendcheckConfig::default()),
    }
}

/// Configuration after CLI arguments were applied over the file.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub error_kind: ErrorKind,
    pub rules: Vec<RuleEntry>,
}

pub struct ConfigMerger {
    config: MendcheckConfig,
}

impl ConfigMerger {
    pub fn new(config: MendcheckConfig) -> Self {
        Self { config }
    }

    /// Merge with `check` arguments. `--error-kind` replaces the file value.
    pub fn merge_check_args(self, cli_error_kind: Option<&str>) -> MergedConfig {
        let error_kind = cli_error_kind
            .map(str::to_string)
            .or(self.config.error_kind)
            .map(error_kind_from_name)
            .unwrap_or_default();

        MergedConfig {
            error_kind,
            rules: self.config.rules,
        }
    }
}

fn error_kind_from_name(name: String) -> ErrorKind {
    let default = ErrorKind::default();
    if name == default.name() {
        default
    } else {
        ErrorKind::custom(name)
    }
}
