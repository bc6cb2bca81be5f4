//! `pay` and `save` transaction handlers.
//!
//! Both share one pipeline: read the body, parse an [`Amount`], run the
//! guarded ledger operation, render an [`Outcome`] as plain text. Every
//! outcome, including failures, is sent with status 200.

use std::fmt;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::ledger::{Amount, Balances, LedgerError};
use crate::observability::metrics;

/// Which ledger operation a handler performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Debit the balance.
    Pay,
    /// Transfer from the balance into the bank.
    Save,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Pay => "pay",
            Operation::Save => "save",
        }
    }
}

/// Result of one transaction request, rendered as the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Balances),
    LowBalance(Operation),
    InvalidAmount,
    UnreadableBody(String),
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Outcome::Applied(_) => "applied",
            Outcome::LowBalance(_) => "low_balance",
            Outcome::InvalidAmount => "invalid_amount",
            Outcome::UnreadableBody(_) => "unreadable_body",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied(b) => {
                write!(f, "current balance: {}, current bank: {}", b.balance, b.bank)
            }
            Outcome::LowBalance(Operation::Pay) => f.write_str("low balance"),
            Outcome::LowBalance(Operation::Save) => f.write_str("low balance for bank transfer"),
            Outcome::InvalidAmount => f.write_str("invalid amount"),
            Outcome::UnreadableBody(e) => write!(f, "error read HTTP body: {e}"),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.to_string()).into_response()
    }
}

/// `POST /pay`: debit the balance.
pub async fn pay(State(state): State<AppState>, request: Request<Body>) -> Outcome {
    process(&state, Operation::Pay, request).await
}

/// `POST /save`: move funds from the balance into the bank.
pub async fn save(State(state): State<AppState>, request: Request<Body>) -> Outcome {
    process(&state, Operation::Save, request).await
}

async fn process(state: &AppState, operation: Operation, request: Request<Body>) -> Outcome {
    let outcome = match read_amount(state, request).await {
        Ok(amount) => apply(state, operation, amount),
        Err(outcome) => outcome,
    };

    metrics::record_transaction(operation.as_str(), outcome.label());
    outcome
}

async fn read_amount(state: &AppState, request: Request<Body>) -> Result<Amount, Outcome> {
    let bytes = axum::body::to_bytes(request.into_body(), state.max_body_size)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            Outcome::UnreadableBody(e.to_string())
        })?;

    let text = std::str::from_utf8(&bytes).map_err(|e| {
        tracing::info!(error = %e, "Body is not valid UTF-8");
        Outcome::InvalidAmount
    })?;

    Amount::parse(text).map_err(|e| {
        tracing::info!(error = %e, "Parse error");
        Outcome::InvalidAmount
    })
}

fn apply(state: &AppState, operation: Operation, amount: Amount) -> Outcome {
    let result = match operation {
        Operation::Pay => state.ledger.debit(amount),
        Operation::Save => state.ledger.transfer(amount),
    };

    match result {
        Ok(balances) => {
            tracing::info!(
                operation = operation.as_str(),
                %amount,
                balance = balances.balance,
                bank = balances.bank,
                "Transaction applied"
            );
            Outcome::Applied(balances)
        }
        Err(LedgerError::InsufficientFunds { requested, available }) => {
            tracing::info!(
                operation = operation.as_str(),
                %requested,
                available,
                "Low balance"
            );
            Outcome::LowBalance(operation)
        }
        Err(e @ LedgerError::BankOverflow(_)) => {
            tracing::warn!(operation = operation.as_str(), error = %e, "Rejected amount");
            Outcome::InvalidAmount
        }
    }
}
