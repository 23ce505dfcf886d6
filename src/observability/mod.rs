//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rules loader, CLI:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (subnet, pop, line) rather than formatted strings
//! - The lookup path itself stays free of logging and metrics
//! - No recorder is installed here; without one, metric calls are no-ops

pub mod logging;
pub mod metrics;
