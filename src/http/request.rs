//! Request correlation identifiers.
//!
//! # Responsibilities
//! - Reuse a caller supplied `X-Request-ID` when it is not blank
//! - Otherwise generate a compact random id (16 bytes, base64 URL-safe)
//! - Attach the id to request extensions under a typed key
//! - Echo the resolved id on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A failing random source yields a fixed sentinel, never a failed request
//! - Lookups on untagged requests return "" rather than an error

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use base64::prelude::*;
use rand::rngs::OsRng;
use rand::RngCore;
use tower::{Layer, Service};

/// Header carrying the correlation id, inbound and outbound.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Id used when the random source fails.
pub const FALLBACK_REQUEST_ID: &str = "fallback-id";

const RANDOM_BYTES: usize = 16;

/// Opaque per-request correlation id, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the id for an inbound request from its headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        resolve(headers).0
    }
}

/// Pick the id for a request and the header value to echo.
///
/// A supplied value is echoed byte for byte; the extension holds its lossy
/// UTF-8 rendering so ids carrying obs-text still resolve.
fn resolve(headers: &HeaderMap) -> (RequestId, Option<HeaderValue>) {
    match headers.get(&X_REQUEST_ID).filter(|value| !is_blank(value)) {
        Some(value) => {
            let id = RequestId::new(String::from_utf8_lossy(value.as_bytes()));
            (id, Some(value.clone()))
        }
        None => {
            let id = generate_request_id();
            let header = HeaderValue::from_str(id.as_str()).ok();
            (id, header)
        }
    }
}

fn is_blank(value: &HeaderValue) -> bool {
    value.as_bytes().iter().all(u8::is_ascii_whitespace)
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh id from the OS random source.
pub fn generate_request_id() -> RequestId {
    generate_with(&mut OsRng)
}

fn generate_with<R: RngCore>(rng: &mut R) -> RequestId {
    let mut bytes = [0u8; RANDOM_BYTES];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => RequestId(BASE64_URL_SAFE_NO_PAD.encode(bytes)),
        Err(e) => {
            tracing::warn!(error = %e, "Random source failed, using fallback request id");
            RequestId::new(FALLBACK_REQUEST_ID)
        }
    }
}

/// Read the correlation id attached to a request.
pub trait RequestIdExt {
    /// The request's id, or `""` if none was attached.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .map(RequestId::as_str)
            .unwrap_or("")
    }
}

/// Layer that resolves, attaches, and echoes the request id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let (id, header) = resolve(request.headers());

        if let Some(value) = &header {
            request.headers_mut().insert(X_REQUEST_ID, value.clone());
        }
        request.extensions_mut().insert(id);

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            if let Some(value) = header {
                response.headers_mut().insert(X_REQUEST_ID, value);
            }
            Ok(response)
        })
    }
}
