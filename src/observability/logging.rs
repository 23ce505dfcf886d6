//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG` over the configured level
//! - Switch between human-readable and JSON output

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::LogFormat;

/// Build the filter: `RUST_LOG` if set, otherwise `ecs_router=<level>`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("ecs_router={level}")))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let json = matches!(format, LogFormat::Json).then(|| fmt::layer().json().with_writer(std::io::stderr));
    let pretty = matches!(format, LogFormat::Pretty).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(json)
        .with(pretty)
        .try_init()
}
