//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use ledger_service::config::ServiceConfig;
use ledger_service::ledger::Ledger;
use ledger_service::lifecycle::{self, RunningServer, Shutdown};

/// A service bound to an ephemeral local port.
pub struct TestService {
    pub addr: SocketAddr,
    pub ledger: Arc<Ledger>,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    server: RunningServer,
}

impl TestService {
    /// Start a service whose ledger opens at `balance` / `bank`.
    pub async fn start(balance: i64, bank: i64) -> Self {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.ledger.initial_balance = balance;
        config.ledger.initial_bank = bank;

        let shutdown = Shutdown::new();
        let server = lifecycle::start(config, &shutdown)
            .await
            .expect("service starts");

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr: server.local_addr,
            ledger: server.ledger.clone(),
            client,
            shutdown,
            server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST `body` to `path`, returning (status, request id header, body text).
    pub async fn post(&self, path: &str, body: &str) -> (u16, String, String) {
        self.post_with_id(path, body, None).await
    }

    pub async fn post_with_id(
        &self,
        path: &str,
        body: &str,
        request_id: Option<&str>,
    ) -> (u16, String, String) {
        let mut request = self.client.post(self.url(path)).body(body.to_string());
        if let Some(id) = request_id {
            request = request.header("X-Request-ID", id);
        }
        let res = request.send().await.expect("service reachable");

        let status = res.status().as_u16();
        let id = res
            .headers()
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        (status, id, res.text().await.unwrap())
    }

    /// Trigger shutdown and wait for the server to drain.
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.server.handle.await.unwrap().unwrap();
    }
}
