//! Ledger Service - single-writer command loop
//!
//! Wraps a [`LedgerCore`] in a dedicated task that owns it exclusively.
//! Callers hold a cloneable [`LedgerHandle`] and talk to the task over a
//! bounded mpsc channel; every command carries a oneshot sender and its
//! result is delivered exactly once.
//!
//! # Why single-writer
//!
//! One task applies every command in arrival order, so:
//! - concurrent deposits on one account can never interleave into a lost
//!   update;
//! - a transfer touches both of its accounts within one command - no lock
//!   ordering, no deadlock between opposite-direction transfers;
//! - reads observe a consistent point-in-time state between commands.
//!
//! # Bounded waiting
//!
//! The bounded channel provides backpressure, and every request carries a
//! timeout. A caller never waits on the ledger indefinitely; exceeding the
//! bound fails the request with [`LedgerError::Timeout`].
//!
//! # Lifecycle
//!
//! The loop runs until every handle is dropped, then drains and exits.
//! Requests sent to a stopped service fail with [`LedgerError::ServiceClosed`].

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::core_types::{AccountId, Amount};

use super::core::LedgerCore;
use super::error::LedgerError;
use super::outcome::TransactionOutcome;

/// Tuning for the service loop and its handles
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Command queue capacity (backpressure bound)
    pub queue_size: usize,
    /// Per-request reply timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            queue_size: 1024,
            request_timeout_ms: 2000,
        }
    }
}

enum LedgerCommand {
    Deposit {
        account: AccountId,
        amount: Amount,
        reply: oneshot::Sender<Result<Amount, LedgerError>>,
    },
    Balance {
        account: AccountId,
        reply: oneshot::Sender<Amount>,
    },
    HasEnough {
        account: AccountId,
        amount: Amount,
        reply: oneshot::Sender<bool>,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
        reply: oneshot::Sender<TransactionOutcome>,
    },
}

/// Spawns the command loop that owns a [`LedgerCore`]
pub struct LedgerService;

impl LedgerService {
    /// Start the service task and return the first handle to it.
    ///
    /// The task stops once every clone of the returned handle is dropped.
    pub fn spawn(core: LedgerCore, config: ServiceConfig) -> LedgerHandle {
        let (tx, mut rx) = mpsc::channel(config.queue_size);

        tokio::spawn(async move {
            let mut core = core;
            while let Some(cmd) = rx.recv().await {
                Self::apply(&mut core, cmd);
            }
            tracing::info!("Ledger service stopped: all handles dropped");
        });

        LedgerHandle {
            tx,
            request_timeout_ms: config.request_timeout_ms,
        }
    }

    fn apply(core: &mut LedgerCore, cmd: LedgerCommand) {
        // A dropped receiver means the caller timed out; the operation has
        // still been applied, so the send result is intentionally ignored.
        match cmd {
            LedgerCommand::Deposit {
                account,
                amount,
                reply,
            } => {
                let _ = reply.send(core.deposit(account, amount));
            }
            LedgerCommand::Balance { account, reply } => {
                let _ = reply.send(core.balance_of(account));
            }
            LedgerCommand::HasEnough {
                account,
                amount,
                reply,
            } => {
                let _ = reply.send(core.has_enough(account, amount));
            }
            LedgerCommand::Transfer {
                from,
                to,
                amount,
                reply,
            } => {
                let _ = reply.send(core.transfer(from, to, amount));
            }
        }
    }
}

/// Cloneable async handle to the ledger service
#[derive(Clone)]
pub struct LedgerHandle {
    tx: mpsc::Sender<LedgerCommand>,
    request_timeout_ms: u64,
}

impl LedgerHandle {
    /// Deposit funds into an account, creating it if absent.
    /// Resolves to the new balance.
    pub async fn deposit(&self, account: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.send(LedgerCommand::Deposit {
            account,
            amount,
            reply,
        })
        .await?;
        self.recv(rx).await?
    }

    /// Current balance of an account (zero for unknown accounts)
    pub async fn balance(&self, account: AccountId) -> Result<Amount, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.send(LedgerCommand::Balance { account, reply }).await?;
        self.recv(rx).await
    }

    /// Whether the account's balance covers `amount` right now.
    /// Advisory only; see [`EconomyProvider::has_enough`](super::EconomyProvider::has_enough).
    pub async fn has_enough(
        &self,
        account: AccountId,
        amount: Amount,
    ) -> Result<bool, LedgerError> {
        let (reply, rx) = oneshot::channel();
        self.send(LedgerCommand::HasEnough {
            account,
            amount,
            reply,
        })
        .await?;
        self.recv(rx).await
    }

    /// Atomically move `amount` from one account to another.
    ///
    /// Zero amounts are rejected here, before a command is issued; executed
    /// transfers resolve to a [`TransactionOutcome`].
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<TransactionOutcome, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let (reply, rx) = oneshot::channel();
        self.send(LedgerCommand::Transfer {
            from,
            to,
            amount,
            reply,
        })
        .await?;
        self.recv(rx).await
    }

    async fn send(&self, cmd: LedgerCommand) -> Result<(), LedgerError> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| LedgerError::ServiceClosed)
    }

    async fn recv<T>(&self, rx: oneshot::Receiver<T>) -> Result<T, LedgerError> {
        match tokio::time::timeout(Duration::from_millis(self.request_timeout_ms), rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(LedgerError::ServiceClosed),
            Err(_) => Err(LedgerError::Timeout(self.request_timeout_ms)),
        }
    }
}
