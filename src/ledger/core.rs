//! LedgerCore - the authoritative balance state
//!
//! Synchronous, single-owner core holding every account balance. ALL balance
//! operations go through this type; the async service in
//! [`service`](super::service) owns one instance and serializes access to it.
//!
//! # Mutation ordering (CRITICAL)
//!
//! Every mutating operation follows the same discipline:
//!
//! 1. Validate - read-only checks, NO state mutation
//! 2. Journal  - persist the change (skipped when journaling is off)
//! 3. Mutate   - apply to balances (cannot fail after step 1)
//!
//! A journal failure therefore leaves the balance state untouched, which is
//! what makes the transfer FAILURE outcome safe to report as "no effect".

use chrono::Utc;
use rustc_hash::FxHashMap;
use std::io;
use std::path::Path;

use crate::balance::Balance;
use crate::core_types::{AccountId, Amount, TxnId};

use super::error::LedgerError;
use super::journal::{self, JournalEntry, JournalOp, JournalWriter};
use super::outcome::TransactionOutcome;

/// In-memory account ledger with optional journal persistence
pub struct LedgerCore {
    /// Account balances - the authoritative state
    accounts: FxHashMap<AccountId, Balance>,
    /// Transaction journal; None disables persistence
    journal: Option<JournalWriter>,
    /// Next transaction ID
    next_txn_id: TxnId,
}

impl LedgerCore {
    /// Create an empty, non-persistent ledger
    pub fn new() -> Self {
        Self {
            accounts: FxHashMap::default(),
            journal: None,
            next_txn_id: 1,
        }
    }

    /// Create a ledger backed by a journal file.
    ///
    /// An existing journal is replayed to rebuild balances; new changes are
    /// appended to the same file.
    pub fn with_journal(path: &Path) -> io::Result<Self> {
        let state = journal::replay(path)?;
        if state.entry_count > 0 {
            tracing::info!(
                entries = state.entry_count,
                accounts = state.accounts.len(),
                "Recovered ledger state from journal"
            );
        }
        let writer = JournalWriter::open(path)?;

        Ok(Self {
            accounts: state.accounts,
            journal: Some(writer),
            next_txn_id: state.next_txn_id,
        })
    }

    /// Number of accounts that have ever been credited
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    // ============================================================
    // QUERY OPERATIONS (Read-Only)
    // ============================================================

    /// Current balance of an account; unknown accounts read as zero
    #[inline]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.accounts.get(&account).map_or(0, |b| b.avail())
    }

    /// Whether the account's balance covers `amount`.
    ///
    /// Computed against the current state; advisory only (a later operation
    /// may change the balance before the caller acts on the answer).
    #[inline]
    pub fn has_enough(&self, account: AccountId, amount: Amount) -> bool {
        self.balance_of(account) >= amount
    }

    // ============================================================
    // DEPOSIT (External funds coming in)
    // ============================================================

    /// Deposit funds, creating the account if absent (lazy init).
    ///
    /// This is the only way new funds enter the ledger. Returns the new
    /// balance.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        // 1. Validate
        let new_balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // 2. Journal
        let txn_id = self.next_txn_id;
        if let Some(ref mut journal) = self.journal {
            journal.append(&JournalEntry {
                txn_id,
                op: JournalOp::Deposit,
                account_id: account,
                delta: amount,
                balance_after: new_balance,
                at: Utc::now(),
            })?;
        }
        self.next_txn_id += 1;

        // 3. Mutate
        let balance = self.accounts.entry(account).or_default();
        balance
            .deposit(amount)
            .expect("overflow checked before journaling");

        tracing::debug!(%account, amount, new_balance, "deposit applied");
        Ok(new_balance)
    }

    // ============================================================
    // TRANSFER (Atomic two-account mutation)
    // ============================================================

    /// Atomically debit `from` and credit `to`.
    ///
    /// On SUCCESS both balances are updated before this returns; on any other
    /// outcome neither balance changes. A self-transfer nets to zero, so a
    /// sufficient balance yields SUCCESS with no mutation.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> TransactionOutcome {
        // The async edge rejects zero amounts before they reach the core;
        // defend anyway so a direct caller cannot corrupt state.
        if amount == 0 {
            return TransactionOutcome::Failure;
        }

        if from == to {
            return if self.has_enough(from, amount) {
                TransactionOutcome::Success
            } else {
                TransactionOutcome::InsufficientFunds
            };
        }

        // 1. Validate
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return TransactionOutcome::InsufficientFunds;
        }
        let from_after = from_balance - amount;

        let Some(to_after) = self.balance_of(to).checked_add(amount) else {
            tracing::error!(%from, %to, amount, "Transfer rejected: credit would overflow");
            return TransactionOutcome::Failure;
        };

        // 2. Journal (debit + credit under one txn_id, single write)
        let txn_id = self.next_txn_id;
        if let Some(ref mut journal) = self.journal {
            let at = Utc::now();
            let debit = JournalEntry {
                txn_id,
                op: JournalOp::Debit,
                account_id: from,
                delta: amount,
                balance_after: from_after,
                at,
            };
            let credit = JournalEntry {
                txn_id,
                op: JournalOp::Credit,
                account_id: to,
                delta: amount,
                balance_after: to_after,
                at,
            };
            if let Err(e) = journal.append_pair(&debit, &credit) {
                tracing::error!(%from, %to, amount, error = %e, "Transfer rejected: journal write failed");
                return TransactionOutcome::Failure;
            }
        }
        self.next_txn_id += 1;

        // 3. Mutate (cannot fail: both sides validated above)
        self.accounts
            .get_mut(&from)
            .expect("source exists: its balance covered the amount")
            .withdraw(amount)
            .expect("sufficiency checked before journaling");
        self.accounts
            .entry(to)
            .or_default()
            .deposit(amount)
            .expect("overflow checked before journaling");

        tracing::debug!(%from, %to, amount, txn_id, "transfer committed");
        TransactionOutcome::Success
    }
}

impl Default for LedgerCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn acct() -> AccountId {
        AccountId::new_v4()
    }

    fn test_journal_path(tag: &str) -> PathBuf {
        let dir = PathBuf::from(format!(
            "target/test_ledger_core_{}_{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.csv", tag));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_deposit_and_query() {
        let mut ledger = LedgerCore::new();
        let a = acct();

        assert_eq!(ledger.balance_of(a), 0);
        assert_eq!(ledger.deposit(a, 1000).unwrap(), 1000);
        assert_eq!(ledger.deposit(a, 500).unwrap(), 1500);
        assert_eq!(ledger.balance_of(a), 1500);
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_unchanged() {
        let mut ledger = LedgerCore::new();
        let a = acct();

        ledger.deposit(a, u64::MAX).unwrap();
        assert!(matches!(ledger.deposit(a, 1), Err(LedgerError::Overflow)));
        assert_eq!(ledger.balance_of(a), u64::MAX);
    }

    #[test]
    fn test_has_enough_boundary() {
        let mut ledger = LedgerCore::new();
        let a = acct();
        ledger.deposit(a, 10).unwrap();

        assert!(ledger.has_enough(a, 0));
        assert!(ledger.has_enough(a, 10));
        assert!(!ledger.has_enough(a, 11));
        // Unknown accounts read as zero
        assert!(ledger.has_enough(acct(), 0));
        assert!(!ledger.has_enough(acct(), 1));
    }

    #[test]
    fn test_transfer_success() {
        let mut ledger = LedgerCore::new();
        let (a, b) = (acct(), acct());
        ledger.deposit(a, 1000).unwrap();

        let outcome = ledger.transfer(a, b, 400);
        assert_eq!(outcome, TransactionOutcome::Success);
        assert_eq!(ledger.balance_of(a), 600);
        assert_eq!(ledger.balance_of(b), 400);
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let mut ledger = LedgerCore::new();
        let (a, b) = (acct(), acct());
        ledger.deposit(a, 100).unwrap();
        ledger.deposit(b, 50).unwrap();

        let outcome = ledger.transfer(a, b, 101);
        assert_eq!(outcome, TransactionOutcome::InsufficientFunds);
        assert_eq!(ledger.balance_of(a), 100);
        assert_eq!(ledger.balance_of(b), 50);
    }

    #[test]
    fn test_transfer_from_unknown_account() {
        let mut ledger = LedgerCore::new();
        let outcome = ledger.transfer(acct(), acct(), 10);
        assert_eq!(outcome, TransactionOutcome::InsufficientFunds);
    }

    #[test]
    fn test_transfer_credit_overflow_is_failure() {
        let mut ledger = LedgerCore::new();
        let (a, b) = (acct(), acct());
        ledger.deposit(a, 1000).unwrap();
        ledger.deposit(b, u64::MAX).unwrap();

        let outcome = ledger.transfer(a, b, 1);
        assert_eq!(outcome, TransactionOutcome::Failure);
        assert_eq!(ledger.balance_of(a), 1000);
        assert_eq!(ledger.balance_of(b), u64::MAX);
    }

    #[test]
    fn test_self_transfer() {
        let mut ledger = LedgerCore::new();
        let a = acct();
        ledger.deposit(a, 100).unwrap();

        assert_eq!(ledger.transfer(a, a, 100), TransactionOutcome::Success);
        assert_eq!(ledger.balance_of(a), 100);

        assert_eq!(
            ledger.transfer(a, a, 101),
            TransactionOutcome::InsufficientFunds
        );
        assert_eq!(ledger.balance_of(a), 100);
    }

    #[test]
    fn test_zero_amount_transfer_is_failure() {
        let mut ledger = LedgerCore::new();
        let (a, b) = (acct(), acct());
        assert_eq!(ledger.transfer(a, b, 0), TransactionOutcome::Failure);
    }

    #[test]
    fn test_journal_recovery_roundtrip() {
        let path = test_journal_path("recovery");
        let (a, b) = (acct(), acct());

        {
            let mut ledger = LedgerCore::with_journal(&path).unwrap();
            ledger.deposit(a, 1000).unwrap();
            ledger.deposit(b, 200).unwrap();
            assert_eq!(ledger.transfer(a, b, 300), TransactionOutcome::Success);
        }

        // A fresh core over the same journal sees identical balances
        let recovered = LedgerCore::with_journal(&path).unwrap();
        assert_eq!(recovered.balance_of(a), 700);
        assert_eq!(recovered.balance_of(b), 500);
        assert_eq!(recovered.account_count(), 2);

        // And keeps assigning fresh transaction IDs
        assert_eq!(recovered.next_txn_id, 4);
    }
}
