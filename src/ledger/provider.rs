//! EconomyProvider - the seam consumers program against
//!
//! Components that need the economy (the HTTP gateway, embedding hosts)
//! receive an `Arc<dyn EconomyProvider>` at construction time. There is no
//! process-wide provider registry: the handle is injected explicitly and its
//! lifetime is the injector's to manage.

use async_trait::async_trait;

use crate::core_types::{AccountId, Amount};

use super::error::LedgerError;
use super::outcome::TransactionOutcome;
use super::service::LedgerHandle;

/// Asynchronous account-ledger API.
///
/// Every operation resolves exactly once; failures surface as `Err`, never
/// by dropping the result. Amounts are minor currency units.
#[async_trait]
pub trait EconomyProvider: Send + Sync {
    /// Increase the account's balance by `amount`, creating the account if
    /// absent. Resolves to the new balance.
    async fn deposit(&self, account: AccountId, amount: Amount) -> Result<Amount, LedgerError>;

    /// Current balance; unknown accounts read as zero.
    async fn balance(&self, account: AccountId) -> Result<Amount, LedgerError>;

    /// Whether the balance covered `amount` at the instant the check ran.
    ///
    /// This is ADVISORY ONLY - it is not a reservation, and a concurrent
    /// operation may change the balance before the caller acts on the
    /// answer. Callers that need check-then-act atomicity must use
    /// [`transfer`](Self::transfer), which re-validates.
    async fn has_enough(&self, account: AccountId, amount: Amount) -> Result<bool, LedgerError>;

    /// Atomically debit `from` and credit `to`.
    ///
    /// Resolves to the transaction outcome; `INSUFFICIENT_FUNDS` and
    /// `FAILURE` guarantee no balance changed. Zero amounts fail with
    /// [`LedgerError::InvalidAmount`] before execution.
    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<TransactionOutcome, LedgerError>;
}

#[async_trait]
impl EconomyProvider for LedgerHandle {
    async fn deposit(&self, account: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        LedgerHandle::deposit(self, account, amount).await
    }

    async fn balance(&self, account: AccountId) -> Result<Amount, LedgerError> {
        LedgerHandle::balance(self, account).await
    }

    async fn has_enough(&self, account: AccountId, amount: Amount) -> Result<bool, LedgerError> {
        LedgerHandle::has_enough(self, account, amount).await
    }

    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<TransactionOutcome, LedgerError> {
        LedgerHandle::transfer(self, from, to, amount).await
    }
}
