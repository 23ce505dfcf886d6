//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject an empty rule path
//! - Reject unknown log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ConfigIssue>>

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("rules.path must not be empty")]
    EmptyRulesPath,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    if config.rules.path.as_os_str().is_empty() {
        issues.push(ConfigIssue::EmptyRulesPath);
    }

    let level = &config.observability.log_level;
    if level.parse::<LevelFilter>().is_err() {
        issues.push(ConfigIssue::UnknownLogLevel(level.clone()));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
