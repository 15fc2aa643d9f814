//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr via tracing-subscriber (CLI)
//!     → any `metrics` recorder an embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (address, sequence number, version, request id)
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
