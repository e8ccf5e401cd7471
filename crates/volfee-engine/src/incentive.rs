//! Keeper incentive vault
//!
//! Holds the funded incentive balance and the per-caller accrued rewards.
//! Payment is the last, fallible leg of an update: the vault checks its
//! balance, debits, and credits the caller in one step.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use volfee_core::AccountId;

/// Funded balance plus per-caller accrued payments
#[derive(Debug, Clone, Default)]
pub struct IncentiveVault {
    balance: u64,
    accrued: HashMap<AccountId, u64>,
}

impl IncentiveVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit into the payable balance
    pub fn fund(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Remaining payable balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Pay `amount` to `caller`, failing without any debit when the
    /// balance cannot cover it. A zero amount is a successful no-op.
    pub fn pay(&mut self, caller: AccountId, amount: u64) -> EngineResult<()> {
        if amount == 0 {
            return Ok(());
        }
        if self.balance < amount {
            return Err(EngineError::IncentiveUnavailable {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        let entry = self.accrued.entry(caller).or_insert(0);
        *entry = entry.saturating_add(amount);
        Ok(())
    }

    /// Rewards accrued by `caller` and not yet claimed
    pub fn accrued_of(&self, caller: AccountId) -> u64 {
        self.accrued.get(&caller).copied().unwrap_or(0)
    }

    /// Withdraw and zero the caller's accrued rewards
    pub fn claim(&mut self, caller: AccountId) -> u64 {
        self.accrued.remove(&caller).unwrap_or(0)
    }
}
