//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::middleware::instrument
//!     → span per request (request_id field)
//!     → logging.rs (start / finish events, handler events inside the span)
//!     → metrics.rs (request counters, latency, ledger outcomes)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every event via the request span
//! - Metrics are cheap (atomic increments)
//! - Observability never changes a response

pub mod logging;
pub mod metrics;
