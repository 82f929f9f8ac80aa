//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

use uuid::Uuid;

/// Account ID - globally unique, stable identifier for a balance-holding
/// entity.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - **External**: Assigned by the caller (e.g. a player UUID), not by the
///   ledger
///
/// # Usage:
/// - Primary key for the in-memory account map
/// - Accounts are created lazily on first deposit/credit
pub type AccountId = Uuid;

/// Amount in minor currency units (scaled by the configured decimals).
///
/// All arithmetic on amounts is checked; overflow is an error, never a wrap.
pub type Amount = u64;

/// Transaction ID - unique within the ledger, assigned sequentially.
///
/// A transfer's debit and credit share one transaction ID.
pub type TxnId = u64;
