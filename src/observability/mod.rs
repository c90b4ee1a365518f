//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Managers and node clients produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via the `metrics` facade)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → whatever `metrics` recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (`network`, `tx_hash`, `error`) rather than formatted text
//! - No exporter is bundled; without a recorder, metric calls are no-ops

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
