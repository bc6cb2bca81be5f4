//! Ledger Service Library
//!
//! A small HTTP service guarding one shared balance and bank behind
//! `POST /pay` and `POST /save`.

pub mod config;
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use ledger::{Amount, Balances, Ledger};
pub use lifecycle::Shutdown;
