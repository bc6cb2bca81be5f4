//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ledger_http_requests_total` (counter): requests by method, status
//! - `ledger_http_request_duration_seconds` (histogram): latency by method
//! - `ledger_transactions_total` (counter): ledger operations by operation, outcome
//!
//! # Design Decisions
//! - Recording without an installed recorder is a no-op, so tests need no setup
//! - Prometheus exporter runs its own listener, separate from the service port

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and start its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "ledger_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "ledger_http_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one ledger operation outcome.
pub fn record_transaction(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ledger_transactions_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
