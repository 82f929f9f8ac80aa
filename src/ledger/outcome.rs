//! Transaction Outcome Definitions
//!
//! The enumerated result of a transfer attempt. Insufficient funds is an
//! expected outcome, not an error; it is reported as a value so callers can
//! give it a distinct user-facing message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a transfer attempt
///
/// Produced exactly once per attempt. `INSUFFICIENT_FUNDS` and `FAILURE`
/// both guarantee that neither balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOutcome {
    /// Both balances updated, visible together to subsequent reads
    Success,

    /// Source balance below the requested amount; no mutation
    InsufficientFunds,

    /// Any other error (overflow, journal write failure); no mutation
    Failure,
}

impl TransactionOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionOutcome::Success)
    }

    /// Get human-readable outcome name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionOutcome::Success => "SUCCESS",
            TransactionOutcome::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransactionOutcome::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(TransactionOutcome::Success.is_success());
        assert!(!TransactionOutcome::InsufficientFunds.is_success());
        assert!(!TransactionOutcome::Failure.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransactionOutcome::Success.to_string(), "SUCCESS");
        assert_eq!(
            TransactionOutcome::InsufficientFunds.to_string(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(TransactionOutcome::Failure.to_string(), "FAILURE");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&TransactionOutcome::InsufficientFunds).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_FUNDS\"");
    }
}
