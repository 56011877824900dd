//! Token ledger boundary.
//!
//! The real ledger is an external service. The core only needs a balance
//! lookup and a transfer that either fully succeeds or fails; it never
//! assumes a transfer can be undone.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {account} holds {balance}, needs {amount}")]
    InsufficientFunds {
        account: String,
        balance: u64,
        amount: u64,
    },

    #[error("transfer amount must be positive")]
    ZeroAmount,

    #[error("balance overflow on {0}")]
    Overflow(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

pub trait Ledger {
    fn balance(&self, account: &str) -> u64;
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), LedgerError>;

    /// Credits `account` from outside the system. Hosts that do not accept
    /// deposits through the command stream keep the default refusal.
    fn deposit(&mut self, account: &str, _amount: u64) -> Result<(), LedgerError> {
        Err(LedgerError::Unavailable(format!(
            "deposits to {account} are not accepted by this ledger"
        )))
    }
}

/// Balance table held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<String, u64>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for tests and fixtures.
    #[must_use]
    pub fn with_balance(mut self, account: &str, amount: u64) -> Self {
        self.balances.insert(account.to_lowercase(), amount);
        self
    }

    /// Sum of every balance. Transfers never change it.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.balances.values().sum()
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let balance = self.balance(from);
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                balance,
                amount,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;
        self.balances.insert(from.to_string(), balance - amount);
        self.balances.insert(to.to_string(), credited);
        Ok(())
    }

    fn deposit(&mut self, account: &str, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let credited = self
            .balance(account)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(account.to_string()))?;
        self.balances.insert(account.to_string(), credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_moves_funds() {
        let mut ledger = InMemoryLedger::new().with_balance("alice", 10);
        ledger.transfer("alice", "sink", 4).unwrap();
        assert_eq!(ledger.balance("alice"), 6);
        assert_eq!(ledger.balance("sink"), 4);
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn test_insufficient_funds_leaves_balances() {
        let mut ledger = InMemoryLedger::new().with_balance("alice", 3);
        let err = ledger.transfer("alice", "sink", 4).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { balance: 3, .. }));
        assert_eq!(ledger.balance("alice"), 3);
        assert_eq!(ledger.balance("sink"), 0);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut ledger = InMemoryLedger::new().with_balance("alice", 3);
        assert_eq!(
            ledger.transfer("alice", "sink", 0),
            Err(LedgerError::ZeroAmount)
        );
        assert_eq!(ledger.deposit("alice", 0), Err(LedgerError::ZeroAmount));
    }

    #[test]
    fn test_deposit_credits_account() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit("bob", 25).unwrap();
        assert_eq!(ledger.balance("bob"), 25);
    }

    #[test]
    fn test_with_balance_lowercases() {
        let ledger = InMemoryLedger::new().with_balance("0xABC", 5);
        assert_eq!(ledger.balance("0xabc"), 5);
    }
}
