//! Response status observation.
//!
//! # Responsibilities
//! - Observe the status a handler ultimately produced
//! - Pass the response through unchanged
//!
//! # Design Decisions
//! - Starts at 200, matching a body written without an explicit status
//! - The first recorded status wins; later observations are ignored

use axum::http::{Response, StatusCode};

/// Records the status code of the response passing through it.
#[derive(Debug, Clone, Copy)]
pub struct StatusRecorder {
    status: StatusCode,
    recorded: bool,
}

impl StatusRecorder {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            recorded: false,
        }
    }

    /// Record `response`'s status and hand the response back untouched.
    pub fn observe<B>(&mut self, response: Response<B>) -> Response<B> {
        self.record(response.status());
        response
    }

    /// Record an explicit status. Only the first call per response counts.
    pub fn record(&mut self, status: StatusCode) {
        if !self.recorded {
            self.status = status;
            self.recorded = true;
        }
    }

    /// The last recorded status, or 200 if nothing was recorded.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Default for StatusRecorder {
    fn default() -> Self {
        Self::new()
    }
}
