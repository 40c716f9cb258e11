//! Stake ledger
//!
//! Per-account balances plus the running total. Balances only grow through
//! deposits and are only ever cleared in full.

use super::{AccountId, Amount};
use crate::error::{RegistryError, RegistryResult};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct StakeLedger {
    balances: HashMap<AccountId, Amount>,
    total_staked: Amount,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the account balance and the total.
    ///
    /// Returns the new balance. Overflow of either the balance or the total
    /// is rejected before anything is written.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) -> RegistryResult<Amount> {
        let current = self.balance_of(&account);
        let balance = current
            .checked_add(amount)
            .ok_or(RegistryError::BalanceOverflow(account))?;
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(RegistryError::BalanceOverflow(account))?;

        self.balances.insert(account, balance);
        self.total_staked = total;
        Ok(balance)
    }

    /// Undo a deposit made earlier in the same call.
    pub fn rollback_deposit(&mut self, account: AccountId, amount: Amount) {
        let remaining = self.balance_of(&account).saturating_sub(amount);
        if remaining == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, remaining);
        }
        self.total_staked = self.total_staked.saturating_sub(amount);
    }

    /// Clear the account balance and return what it held.
    pub fn withdraw_all(&mut self, account: AccountId) -> RegistryResult<Amount> {
        match self.balances.remove(&account) {
            Some(balance) if balance > 0 => {
                self.total_staked = self.total_staked.saturating_sub(balance);
                Ok(balance)
            }
            _ => Err(RegistryError::NotAStaker(account)),
        }
    }

    /// Balance of the account, zero for unknown accounts.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    /// Number of accounts holding a non-zero balance.
    pub fn staker_count(&self) -> usize {
        self.balances.len()
    }
}
