//! Runtime configuration: connection strings and validation defaults.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults (target `analytics.db`, 30-day window, 1% threshold),
//! 2. an optional TOML file,
//! 3. `STAR_SYNC_SOURCE_URL` / `STAR_SYNC_TARGET_URL`,
//! 4. command-line flags.
//!
//! ```toml
//! source_url = "sakila.db"
//! target_url = "analytics.db"
//!
//! [validate]
//! window_days = 30
//! threshold_pct = 1.0
//! ```
//!
//! Entrypoints: [`load_config_str`], [`load_config_path`], [`resolve`].

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Environment variable naming the source database.
pub const SOURCE_ENV: &str = "STAR_SYNC_SOURCE_URL";
/// Environment variable naming the target database.
pub const TARGET_ENV: &str = "STAR_SYNC_TARGET_URL";
/// Target used when nothing else is configured.
pub const DEFAULT_TARGET: &str = "analytics.db";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Operational database; required by every command except `init` and `status`.
    pub source_url: Option<String>,
    /// Star-schema database; defaults to [`DEFAULT_TARGET`].
    pub target_url: Option<String>,
    /// Reconciliation defaults.
    #[serde(default)]
    pub validate: ValidateCfg,
}

/// `[validate]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ValidateCfg {
    /// Trailing window in days.
    pub window_days: u32,
    /// Allowed drift per metric, in percent.
    pub threshold_pct: f64,
}

impl Default for ValidateCfg {
    fn default() -> Self {
        Self {
            window_days: 30,
            threshold_pct: 1.0,
        }
    }
}

impl SyncConfig {
    /// Replace connection strings with the ones given; `None` keeps the current value.
    pub fn overlay(&mut self, source: Option<String>, target: Option<String>) {
        if source.is_some() {
            self.source_url = source;
        }
        if target.is_some() {
            self.target_url = target;
        }
    }

    /// Overlay [`SOURCE_ENV`] and [`TARGET_ENV`] when set.
    pub fn apply_env(&mut self) {
        self.overlay(get_env_var(SOURCE_ENV).ok(), get_env_var(TARGET_ENV).ok());
    }

    /// Source connection string.
    pub fn source_url(&self) -> Result<&str, SyncError> {
        self.source_url.as_deref().ok_or(SyncError::MissingSource)
    }

    /// Target connection string, or [`DEFAULT_TARGET`].
    pub fn target_url(&self) -> &str {
        self.target_url.as_deref().unwrap_or(DEFAULT_TARGET)
    }
}

/// Read an environment variable, naming it in the error when unset.
pub fn get_env_var(name: &str) -> Result<String, SyncError> {
    std::env::var(name).map_err(|_| SyncError::MissingEnvVar(name.to_string()))
}

/// Parse a TOML configuration string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<SyncConfig> {
    toml::from_str(toml_str).context("failed to parse config TOML")
}

/// Read and parse a TOML configuration file.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<SyncConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

/// Build the effective configuration: file (if any), then environment, then flags.
pub fn resolve(
    file: Option<&Path>,
    source_flag: Option<String>,
    target_flag: Option<String>,
) -> anyhow::Result<SyncConfig> {
    let mut cfg = match file {
        Some(p) => load_config_path(p)?,
        None => SyncConfig::default(),
    };
    cfg.apply_env();
    cfg.overlay(source_flag, target_flag);
    Ok(cfg)
}
