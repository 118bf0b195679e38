//! Module configuration with TOML file support.

use balances_types::{Balance, KeepAliveViolation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Configuration for the balances module.
///
/// Can be loaded from a TOML file via [`BalancesConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalancesConfig {
    /// Minimum free balance an account needs to exist. TOML integers are
    /// 64-bit, so the configured value is widened to a balance on use.
    #[serde(default = "default_existential_deposit")]
    pub existential_deposit: u64,

    /// Maximum consumer references an account may hold.
    #[serde(default = "default_max_consumers")]
    pub max_consumers: u32,

    /// Index of this module in the runtime; tags events and module errors.
    #[serde(default = "default_module_index")]
    pub module_index: u8,

    /// Which error a withdrawal that would reap a kept-alive account produces.
    #[serde(default)]
    pub keep_alive_violation: KeepAliveViolation,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_existential_deposit() -> u64 {
    1
}

fn default_max_consumers() -> u32 {
    16
}

fn default_module_index() -> u8 {
    5
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BalancesConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn with_existential_deposit(mut self, ed: u64) -> Self {
        self.existential_deposit = ed;
        self
    }

    pub fn with_keep_alive_violation(mut self, violation: KeepAliveViolation) -> Self {
        self.keep_alive_violation = violation;
        self
    }

    pub fn existential_deposit(&self) -> Balance {
        Balance::from(self.existential_deposit)
    }
}

impl Default for BalancesConfig {
    fn default() -> Self {
        Self {
            existential_deposit: default_existential_deposit(),
            max_consumers: default_max_consumers(),
            module_index: default_module_index(),
            keep_alive_violation: KeepAliveViolation::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
