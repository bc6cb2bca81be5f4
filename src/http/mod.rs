//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware wiring)
//!     → request.rs (resolve request ID, attach to extensions, echo header)
//!     → middleware/instrument.rs (span, start/finish events, timing)
//!     → response.rs (status observed for the finish event)
//!     → handlers.rs (parse amount, guarded ledger operation, text reply)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use response::StatusRecorder;
pub use server::{AppState, HttpServer};
