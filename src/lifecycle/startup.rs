//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last, so traffic only arrives when ready

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::ledger::Ledger;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// A server that is bound and accepting requests.
pub struct RunningServer {
    /// Address actually bound (resolves port 0).
    pub local_addr: SocketAddr,
    /// The ledger the server mutates.
    pub ledger: Arc<Ledger>,
    /// Completes once the server has drained after shutdown.
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Start the metrics exporter (if enabled), bind the listener, and spawn the server.
pub async fn start(config: ServiceConfig, shutdown: &Shutdown) -> Result<RunningServer, StartupError> {
    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        address = %local_addr,
        initial_balance = config.ledger.initial_balance,
        initial_bank = config.ledger.initial_bank,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    let ledger = server.ledger();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(RunningServer {
        local_addr,
        ledger,
        handle,
    })
}
