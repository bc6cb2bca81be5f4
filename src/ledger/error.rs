//! Ledger error types.

use thiserror::Error;

use crate::ledger::Amount;

/// Why a guarded ledger operation was not applied.
///
/// A returned error always means both counters are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: i64 },

    #[error("crediting {0} would overflow the bank")]
    BankOverflow(Amount),
}
