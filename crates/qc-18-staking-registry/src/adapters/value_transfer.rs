//! Value Transfer adapter
//!
//! In-memory native balances standing in for the chain's transfer primitive.

use crate::domain::{AccountId, Amount};
use crate::ports::ValueTransfer;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct InMemoryValueTransfer {
    balances: RwLock<HashMap<AccountId, Amount>>,
    payouts: RwLock<Vec<(AccountId, Amount)>>,
    fail_next: AtomicBool,
}

impl InMemoryValueTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit native funds to an account outside the registry.
    pub fn credit(&self, account: AccountId, amount: Amount) {
        let mut balances = self.balances.write();
        let entry = balances.entry(account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Native balance held outside the registry.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    /// All successful payouts, oldest first.
    pub fn payouts(&self) -> Vec<(AccountId, Amount)> {
        self.payouts.read().clone()
    }

    /// Make the next transfer fail once.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl ValueTransfer for InMemoryValueTransfer {
    fn transfer(&self, to: AccountId, amount: Amount) -> Result<(), String> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(format!("transfer to {} rejected", to));
        }
        self.credit(to, amount);
        self.payouts.write().push((to, amount));
        Ok(())
    }
}
