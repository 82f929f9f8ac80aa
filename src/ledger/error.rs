use thiserror::Error;

/// Errors surfaced through the asynchronous ledger API.
///
/// Transfer-specific conditions (insufficient funds, internal failure during
/// the transfer itself) are NOT errors; they are reported as a
/// [`TransactionOutcome`](super::TransactionOutcome) value.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Balance overflow")]
    Overflow,

    #[error("Journal write failed: {0}")]
    Journal(#[from] std::io::Error),

    #[error("Ledger service is not running")]
    ServiceClosed,

    #[error("Ledger request timed out after {0}ms")]
    Timeout(u64),
}
