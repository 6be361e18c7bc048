//! Token metadata.

use serde::{Deserialize, Serialize};

/// Descriptive token parameters, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_name() -> String {
    "MGToken".to_string()
}

fn default_symbol() -> String {
    "MGT".to_string()
}

fn default_decimals() -> u8 {
    18
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}
