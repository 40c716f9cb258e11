//! Bounded validator set
//!
//! Ordered, duplicate-free membership with O(1) admission, lookup and
//! removal. Removal is a swap-remove: the last validator is moved into the
//! vacated slot, so order is insertion order only until the first removal.
//!
//! ```text
//! [A, B, C, D, E]  remove A  →  [E, B, C, D]
//! ```

use super::AccountId;
use crate::error::{RegistryError, RegistryResult};
use std::collections::HashMap;

/// Where a removed validator sat and which validator took its slot.
///
/// Enough to put the set back exactly as it was with [`ValidatorSet::restore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub index: usize,
    pub moved: Option<AccountId>,
}

#[derive(Clone, Debug)]
pub struct ValidatorSet {
    /// Gap-free backing sequence
    members: Vec<AccountId>,
    /// account -> position in `members`
    index: HashMap<AccountId, usize>,
    min_validators: usize,
    max_validators: usize,
}

impl ValidatorSet {
    pub fn new(min_validators: usize, max_validators: usize) -> Self {
        Self {
            members: Vec::with_capacity(max_validators),
            index: HashMap::with_capacity(max_validators),
            min_validators,
            max_validators,
        }
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.index.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_validators
    }

    pub fn min_validators(&self) -> usize {
        self.min_validators
    }

    pub fn max_validators(&self) -> usize {
        self.max_validators
    }

    /// Admit `account` at the end of the set.
    ///
    /// Returns `true` if the account was newly admitted and `false` if it was
    /// already a member, in which case nothing changes.
    pub fn try_admit(&mut self, account: AccountId) -> RegistryResult<bool> {
        if self.is_member(&account) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(RegistryError::CapacityExceeded {
                maximum: self.max_validators,
            });
        }

        self.index.insert(account, self.members.len());
        self.members.push(account);
        Ok(true)
    }

    /// Swap-remove `account`.
    ///
    /// INVARIANT: the set never shrinks below `min_validators` through removal.
    pub fn remove(&mut self, account: &AccountId) -> RegistryResult<Removal> {
        let index = *self
            .index
            .get(account)
            .ok_or(RegistryError::NotMember(*account))?;

        if self.members.len() <= self.min_validators {
            return Err(RegistryError::BelowMinimum {
                current: self.members.len(),
                minimum: self.min_validators,
            });
        }

        self.index.remove(account);
        self.members.swap_remove(index);

        let moved = self.members.get(index).copied();
        if let Some(moved_account) = moved {
            self.index.insert(moved_account, index);
        }

        Ok(Removal { index, moved })
    }

    /// Put a removed validator back into the slot recorded by `removal`.
    ///
    /// Inverse of [`remove`](Self::remove): the validator currently at
    /// `removal.index` goes back to the end. When the set changed in between
    /// the account is still re-inserted at a valid position. Fails with
    /// `CapacityExceeded` if the set is full.
    pub fn restore(&mut self, account: AccountId, removal: Removal) -> RegistryResult<()> {
        if self.is_member(&account) {
            return Ok(());
        }
        if self.is_full() {
            return Err(RegistryError::CapacityExceeded {
                maximum: self.max_validators,
            });
        }

        let end = self.members.len();
        if removal.index < end {
            let displaced = self.members[removal.index];
            self.members.push(displaced);
            self.index.insert(displaced, end);
            self.members[removal.index] = account;
            self.index.insert(account, removal.index);
        } else {
            self.index.insert(account, end);
            self.members.push(account);
        }
        Ok(())
    }

    /// Current ordered membership.
    pub fn snapshot(&self) -> Vec<AccountId> {
        self.members.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountId> {
        self.members.iter()
    }
}
