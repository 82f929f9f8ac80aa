/// ENFORCED BALANCE TYPE - Used by the ledger core
///
/// This is the SINGLE source of truth for balance mutation.
/// ALL balance changes MUST go through these methods.
///
/// # Enforcement Strategy:
/// 1. Fields are PRIVATE - no direct access
/// 2. All mutations return Result - errors are explicit
/// 3. Version auto-increments - audit trail
/// 4. checked_add/sub - overflow protection
use serde::{Deserialize, Serialize};

use crate::core_types::Amount;

/// Balance of a single account
///
/// # Invariants (ENFORCED by private fields):
/// - avail is never negative (unsigned, underflow rejected)
/// - version increments on every mutation
/// - No overflow/underflow (checked arithmetic)
///
/// # Usage:
/// ```ignore
/// let mut balance = Balance::default();
/// balance.deposit(1000)?;   // avail = 1000, version = 1
/// balance.withdraw(400)?;   // avail = 600,  version = 2
/// assert!(balance.has_enough(500));
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    avail: Amount, // PRIVATE - ONLY modified through deposit/withdraw
    version: u64,  // PRIVATE - incremented on every mutation
}

impl Balance {
    /// Get available balance (read-only)
    #[inline(always)]
    pub const fn avail(&self) -> Amount {
        self.avail
    }

    /// Get mutation version (read-only)
    #[inline(always)]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Check whether the balance covers `amount`
    #[inline(always)]
    pub const fn has_enough(&self, amount: Amount) -> bool {
        self.avail >= amount
    }

    /// Deposit funds
    ///
    /// # Errors
    /// - Returns error on overflow
    pub fn deposit(&mut self, amount: Amount) -> Result<(), &'static str> {
        self.avail = self.avail.checked_add(amount).ok_or("Deposit overflow")?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Withdraw funds
    ///
    /// # Errors
    /// - "Insufficient funds" if avail < amount
    /// - "Withdraw underflow" on arithmetic error
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), &'static str> {
        if self.avail < amount {
            return Err("Insufficient funds");
        }
        self.avail = self.avail.checked_sub(amount).ok_or("Withdraw underflow")?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit() {
        let mut bal = Balance::default();
        assert_eq!(bal.avail(), 0);

        bal.deposit(100).unwrap();
        assert_eq!(bal.avail(), 100);
        assert_eq!(bal.version(), 1);

        bal.deposit(50).unwrap();
        assert_eq!(bal.avail(), 150);
        assert_eq!(bal.version(), 2);
    }

    #[test]
    fn test_deposit_overflow() {
        let mut bal = Balance::default();
        bal.deposit(u64::MAX).unwrap();

        // Should fail and leave the balance untouched
        assert!(bal.deposit(1).is_err());
        assert_eq!(bal.avail(), u64::MAX);
    }

    #[test]
    fn test_withdraw() {
        let mut bal = Balance::default();
        bal.deposit(100).unwrap();

        bal.withdraw(60).unwrap();
        assert_eq!(bal.avail(), 40);
        assert_eq!(bal.version(), 2);
    }

    #[test]
    fn test_withdraw_insufficient() {
        let mut bal = Balance::default();
        bal.deposit(50).unwrap();

        assert!(bal.withdraw(100).is_err());
        assert_eq!(bal.avail(), 50); // Unchanged
    }

    #[test]
    fn test_has_enough_boundary() {
        let mut bal = Balance::default();
        bal.deposit(100).unwrap();

        assert!(bal.has_enough(0));
        assert!(bal.has_enough(99));
        assert!(bal.has_enough(100));
        assert!(!bal.has_enough(101));
    }
}
