//! SimpleEconomy - Account Ledger Service
//!
//! A standalone economy service: per-account balances with an asynchronous
//! deposit / balance / sufficiency / transfer API, an HTTP gateway, and a
//! transaction journal.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (AccountId, Amount, TxnId)
//! - [`balance`] - Enforced balance type
//! - [`ledger`] - Ledger core, journal, single-writer service, provider seam
//! - [`money`] - Client amount parsing/formatting
//! - [`gateway`] - HTTP API over the provider seam
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup

// Core types - must be first!
pub mod core_types;

// Ledger components
pub mod balance;
pub mod ledger;
pub mod money;

// Service wiring
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use balance::Balance;
pub use core_types::{AccountId, Amount, TxnId};
pub use ledger::{
    EconomyProvider, LedgerCore, LedgerError, LedgerHandle, LedgerService, ServiceConfig,
    TransactionOutcome,
};
