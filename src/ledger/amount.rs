//! Transaction amounts parsed from request bodies.

use std::fmt;
use thiserror::Error;

/// Reasons a request body is not an acceptable amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Body is empty or only whitespace.
    #[error("amount is empty")]
    Empty,

    /// Body is not a base-10 integer, or does not fit in 64 bits.
    #[error("amount {0:?} is not a valid integer")]
    Malformed(String),

    /// Body parsed, but is below zero.
    #[error("amount {0} is negative")]
    Negative(i64),
}

/// A non-negative amount of money, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create an amount, rejecting negative values.
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value < 0 {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    /// Parse a request body into an amount.
    ///
    /// Surrounding ASCII whitespace is ignored, so `echo 150 | curl --data-binary @-` works.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim_ascii();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let value: i64 = trimmed
            .parse()
            .map_err(|_| AmountError::Malformed(trimmed.to_string()))?;

        Self::new(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(Amount::parse("150").unwrap().get(), 150);
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse("+42").unwrap().get(), 42);
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(Amount::parse("200\n").unwrap().get(), 200);
        assert_eq!(Amount::parse("  7 ").unwrap().get(), 7);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Amount::parse("not-a-number"),
            Err(AmountError::Malformed("not-a-number".into()))
        );
        assert!(matches!(Amount::parse("12.5"), Err(AmountError::Malformed(_))));
        assert!(matches!(Amount::parse("1 000"), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn rejects_empty_body() {
        assert_eq!(Amount::parse(""), Err(AmountError::Empty));
        assert_eq!(Amount::parse(" \r\n"), Err(AmountError::Empty));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(Amount::parse("-100"), Err(AmountError::Negative(-100)));
        assert_eq!(Amount::new(-1), Err(AmountError::Negative(-1)));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            Amount::parse("9223372036854775808"),
            Err(AmountError::Malformed(_))
        ));
        // Fits in i64, so it is a valid (if unaffordable) amount.
        assert_eq!(
            Amount::parse("999999999999999999").unwrap().get(),
            999_999_999_999_999_999
        );
    }
}
