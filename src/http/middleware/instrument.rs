//! Request instrumentation middleware.
//! Logs a start and a finish event per request, with status and elapsed time.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;

use crate::http::request::RequestIdExt;
use crate::http::response::StatusRecorder;
use crate::observability::metrics;

pub async fn instrument(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("request", request_id = %request.request_id());

    async move {
        tracing::info!(%method, %path, "request started");

        let mut recorder = StatusRecorder::new();
        let start = Instant::now();
        let response = recorder.observe(next.run(request).await);
        let elapsed = start.elapsed();

        let status = recorder.status().as_u16();
        tracing::info!(%method, %path, status, ?elapsed, "request finished");
        metrics::record_request(method.as_str(), status, start);

        response
    }
    .instrument(span)
    .await
}
