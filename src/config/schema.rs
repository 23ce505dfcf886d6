//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    /// Where rules come from and which table serves them.
    pub rules: RulesConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Rule source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Path to the `<CIDR> <PoP>` rule file.
    pub path: PathBuf,

    /// Lookup engine.
    pub engine: Engine,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("routing-data.txt"),
            engine: Engine::Trie,
        }
    }
}

/// Routing table implementation.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Bit trie with conflict detection.
    #[default]
    Trie,
    /// Linear scan, no conflict detection.
    Linear,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
