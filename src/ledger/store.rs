//! Shared balance and bank counters with guarded mutation.
//!
//! Both counters live behind a single mutex. `debit` and `transfer` perform
//! their `balance >= amount` check and the update while holding it, so two
//! concurrent operations can never both pass the check against the same
//! balance, and no observer sees a transfer half-applied.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ledger::{Amount, LedgerError};

/// A consistent copy of both counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balances {
    pub balance: i64,
    pub bank: i64,
}

/// The process-wide ledger. Share it via `Arc<Ledger>`.
#[derive(Debug, Default)]
pub struct Ledger {
    inner: Mutex<Balances>,
}

impl Ledger {
    /// Create a ledger with the given opening counters.
    pub fn new(balance: i64, bank: i64) -> Self {
        Self {
            inner: Mutex::new(Balances { balance, bank }),
        }
    }

    /// Subtract `amount` from the balance if it is covered.
    pub fn debit(&self, amount: Amount) -> Result<Balances, LedgerError> {
        let mut state = self.lock();
        Self::ensure_covered(&state, amount)?;

        state.balance -= amount.get();
        Ok(*state)
    }

    /// Move `amount` from the balance into the bank if it is covered.
    pub fn transfer(&self, amount: Amount) -> Result<Balances, LedgerError> {
        let mut state = self.lock();
        Self::ensure_covered(&state, amount)?;

        let bank = state
            .bank
            .checked_add(amount.get())
            .ok_or(LedgerError::BankOverflow(amount))?;

        state.balance -= amount.get();
        state.bank = bank;
        Ok(*state)
    }

    /// Read both counters under the ledger lock.
    pub fn snapshot(&self) -> Balances {
        *self.lock()
    }

    fn ensure_covered(state: &Balances, amount: Amount) -> Result<(), LedgerError> {
        if state.balance >= amount.get() {
            Ok(())
        } else {
            Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: state.balance,
            })
        }
    }

    // Nothing between a check and its update can panic, so a poisoned guard
    // still holds fully applied counters.
    fn lock(&self) -> MutexGuard<'_, Balances> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
