//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the transaction handlers
//! - Wire up middleware (request ID, instrumentation, timeout)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServiceConfig;
use crate::http::handlers::{pay, save};
use crate::http::middleware::instrument;
use crate::http::request::RequestIdLayer;
use crate::ledger::Ledger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub max_body_size: usize,
}

/// HTTP server for the ledger service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    ledger: Arc<Ledger>,
}

impl HttpServer {
    /// Create a new HTTP server with a ledger opened from the configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let ledger = Arc::new(Ledger::new(
            config.ledger.initial_balance,
            config.ledger.initial_bank,
        ));
        Self::with_ledger(config, ledger)
    }

    /// Create a new HTTP server around an existing ledger.
    pub fn with_ledger(config: ServiceConfig, ledger: Arc<Ledger>) -> Self {
        let state = AppState {
            ledger: ledger.clone(),
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            ledger,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: request ID, then instrumentation, then timeout.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/pay", post(pay))
            .route("/save", post(save))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )))
            .layer(middleware::from_fn(instrument))
            .layer(RequestIdLayer)
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the service without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The shared ledger behind the handlers.
    pub fn ledger(&self) -> Arc<Ledger> {
        self.ledger.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::X_REQUEST_ID;
    use crate::ledger::Balances;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn post_body(server: &HttpServer, path: &str, body: &'static str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::from(body))
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        let status = response.status();
        assert!(response.headers().contains_key(X_REQUEST_ID));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn routes_share_one_ledger() {
        let server = HttpServer::new(ServiceConfig::default());

        let (status, body) = post_body(&server, "/pay", "150").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "current balance: 850, current bank: 0");

        let (_, body) = post_body(&server, "/save", "200").await;
        assert_eq!(body, "current balance: 650, current bank: 200");

        assert_eq!(server.ledger().snapshot(), Balances { balance: 650, bank: 200 });
    }

    #[tokio::test]
    async fn uses_injected_ledger() {
        let ledger = Arc::new(Ledger::new(5, 1));
        let server = HttpServer::with_ledger(ServiceConfig::default(), ledger.clone());

        let (_, body) = post_body(&server, "/pay", "10").await;
        assert_eq!(body, "low balance");
        assert_eq!(ledger.snapshot(), Balances { balance: 5, bank: 1 });
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let server = HttpServer::new(ServiceConfig::default());
        let request = Request::builder().uri("/pay").body(Body::empty()).unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
