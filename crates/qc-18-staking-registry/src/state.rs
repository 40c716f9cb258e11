use crate::config::RegistryConfig;
use crate::domain::{
    AccountId, Amount, BlsPublicKey, KeyRegistry, Removal, StakeLedger, ValidatorSet,
};
use crate::error::{RegistryError, RegistryResult};

/// Outcome of a committed deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeReceipt {
    pub balance: Amount,
    pub admitted: bool,
}

/// Committed withdrawal, kept until the payout settles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    pub account: AccountId,
    pub amount: Amount,
    pub removal: Option<Removal>,
}

/// Mutable state of the registry.
///
/// Every method either applies all of its changes or none of them.
pub struct RegistryState {
    pub ledger: StakeLedger,
    pub validators: ValidatorSet,
    pub keys: KeyRegistry,
    threshold: Amount,
}

impl RegistryState {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            ledger: StakeLedger::new(),
            validators: ValidatorSet::new(config.min_validators, config.max_validators),
            keys: KeyRegistry::new(),
            threshold: config.threshold,
        }
    }

    /// Deposit and, at or above threshold, admit as one unit.
    pub fn apply_stake(&mut self, account: AccountId, amount: Amount) -> RegistryResult<StakeReceipt> {
        if amount == 0 {
            return Err(RegistryError::ZeroAmount);
        }

        let balance = self.ledger.deposit(account, amount)?;
        if balance < self.threshold {
            return Ok(StakeReceipt {
                balance,
                admitted: false,
            });
        }

        match self.validators.try_admit(account) {
            Ok(admitted) => Ok(StakeReceipt { balance, admitted }),
            Err(e) => {
                self.ledger.rollback_deposit(account, amount);
                Err(e)
            }
        }
    }

    /// Leave the validator set and clear the balance as one unit.
    ///
    /// The membership check runs first so a `BelowMinimum` rejection leaves
    /// the balance untouched.
    pub fn apply_unstake(&mut self, account: AccountId) -> RegistryResult<Withdrawal> {
        if self.ledger.balance_of(&account) == 0 {
            return Err(RegistryError::NotAStaker(account));
        }

        let removal = if self.validators.is_member(&account) {
            Some(self.validators.remove(&account)?)
        } else {
            None
        };

        match self.ledger.withdraw_all(account) {
            Ok(amount) => Ok(Withdrawal {
                account,
                amount,
                removal,
            }),
            Err(e) => {
                if let Some(removal) = removal {
                    let _ = self.validators.restore(account, removal);
                }
                Err(e)
            }
        }
    }

    /// Undo a committed withdrawal whose payout failed.
    ///
    /// Returns `false` if the account could not be put back into the
    /// validator set because it filled up in the meantime.
    pub fn revert_unstake(&mut self, withdrawal: &Withdrawal) -> RegistryResult<bool> {
        self.ledger.deposit(withdrawal.account, withdrawal.amount)?;
        match withdrawal.removal {
            Some(removal) => Ok(self.validators.restore(withdrawal.account, removal).is_ok()),
            None => Ok(true),
        }
    }

    pub fn register_key(&mut self, account: AccountId, key: BlsPublicKey) {
        self.keys.set_key(account, key);
    }

    pub fn validator_keys(&self) -> Vec<BlsPublicKey> {
        self.keys.filtered_by_membership(self.validators.iter())
    }
}
