//! Runner configuration with TOML file support.

use anyhow::Context;
use mgt_governance::TokenMetadata;
use mgt_types::AccountId;
use mgt_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a replay run.
///
/// Can be loaded from a TOML file via [`RunnerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// The account allowed to mint and burn.
    #[serde(default = "default_owner")]
    pub owner: AccountId,

    /// Unit the first scripted operation executes in.
    #[serde(default = "default_start_unit")]
    pub start_unit: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub token: TokenMetadata,
}

// ── Serde default helpers ──────────────────────────────────────────────

/// First account of the usual local development chain.
fn default_owner() -> AccountId {
    AccountId::new([
        0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79,
        0xcf, 0xff, 0xb9, 0x22, 0x66,
    ])
}

fn default_start_unit() -> u64 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RunnerConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            start_unit: default_start_unit(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            token: TokenMetadata::default(),
        }
    }
}
