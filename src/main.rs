//! Ledger Service
//!
//! An HTTP service over one shared balance and a savings bank.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ RequestIdLayer ──▶ instrument ──▶ timeout ──▶ pay / save
//!                     (x-request-id)     (span, logs,               (parse amount,
//!                                         status, timing)            guarded ledger op)
//!                                                                         │
//!     Client Response                                                     ▼
//!     ◀────────────── x-request-id echoed ◀──────────────────── 200 text/plain
//! ```

use std::path::PathBuf;

use clap::Parser;

use ledger_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use ledger_service::lifecycle::{self, signals, Shutdown};
use ledger_service::observability::logging;

#[derive(Parser)]
#[command(name = "ledger-service")]
#[command(about = "HTTP service guarding a shared balance and bank", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("ledger-service v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let server = match lifecycle::start(config, &shutdown).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    server.handle.await??;

    let closing = server.ledger.snapshot();
    tracing::info!(
        balance = closing.balance,
        bank = closing.bank,
        "Shutdown complete"
    );
    Ok(())
}
