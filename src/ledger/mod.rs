//! Ledger subsystem.
//!
//! # Data Flow
//! ```text
//! request body (text)
//!     → amount.rs (parse & validate, never negative)
//!     → store.rs (guarded debit / transfer under one lock)
//!     → Balances snapshot returned to the caller
//! ```
//!
//! # Design Decisions
//! - One mutex guards both counters; check and update happen inside it
//! - No `.await` while the lock is held, so a critical section always runs to completion
//! - Callers only see `Balances` copies, never the counters themselves

pub mod amount;
pub mod error;
pub mod store;

pub use amount::{Amount, AmountError};
pub use error::LedgerError;
pub use store::{Balances, Ledger};
