//! BLS public key registry
//!
//! Keys are stored per account, independent of stake and of validator
//! membership. A key registered before admission, or kept across an exit and
//! later re-admission, is served again without re-registering.

use super::{AccountId, BlsPublicKey};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct KeyRegistry {
    keys: HashMap<AccountId, BlsPublicKey>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert; the last write wins.
    pub fn set_key(&mut self, account: AccountId, key: BlsPublicKey) {
        self.keys.insert(account, key);
    }

    /// Registered key, or the empty blob.
    pub fn get_key(&self, account: &AccountId) -> BlsPublicKey {
        self.keys.get(account).cloned().unwrap_or_default()
    }

    pub fn has_key(&self, account: &AccountId) -> bool {
        self.keys.contains_key(account)
    }

    /// One key per entry of `validators`, in the same order.
    ///
    /// Validators without a registered key get the empty blob so positions
    /// stay aligned with the validator list.
    pub fn filtered_by_membership<'a>(
        &self,
        validators: impl IntoIterator<Item = &'a AccountId>,
    ) -> Vec<BlsPublicKey> {
        validators
            .into_iter()
            .map(|account| self.get_key(account))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
