//! Staking Registry Service - Core business logic
//!
//! # Architecture
//! - Ledger, validator set and key registry live behind one lock
//! - Each entry point mutates state in a single write-locked phase
//! - Outbound calls (payout, event publish) run after the lock is released
//!
//! # Unstake sequencing
//!
//! ```text
//! [write lock] remove validator → clear balance [unlock]
//!     → ValueTransfer::transfer (may re-enter)
//!     → EventBus::publish(Unstaked)
//! ```
//!
//! A re-entrant `unstake` from inside the transfer sees the cleared balance
//! and fails with `NotAStaker`.

use crate::config::RegistryConfig;
use crate::domain::{format_ether, AccountId, Amount, BlsPublicKey};
use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::metrics;
use crate::ports::{EventBus, StakingApi, ValueTransfer};
use crate::state::RegistryState;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Dependencies for StakingRegistryService
pub struct RegistryDependencies<T, E> {
    pub config: RegistryConfig,
    pub transfer: Arc<T>,
    pub event_bus: Arc<E>,
}

/// Staking Registry Service
pub struct StakingRegistryService<T, E>
where
    T: ValueTransfer,
    E: EventBus,
{
    config: RegistryConfig,
    state: RwLock<RegistryState>,
    transfer: Arc<T>,
    event_bus: Arc<E>,
}

impl<T, E> StakingRegistryService<T, E>
where
    T: ValueTransfer,
    E: EventBus,
{
    /// Create a new registry with empty ledger, validator set and keys.
    ///
    /// Fails with `InvalidConfig` when `min_validators > max_validators`.
    pub fn new(deps: RegistryDependencies<T, E>) -> RegistryResult<Self> {
        deps.config.validate()?;

        info!(
            min_validators = deps.config.min_validators,
            max_validators = deps.config.max_validators,
            threshold = %format_ether(deps.config.threshold),
            "Staking registry created"
        );

        Ok(Self {
            state: RwLock::new(RegistryState::new(&deps.config)),
            config: deps.config,
            transfer: deps.transfer,
            event_bus: deps.event_bus,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registered key of any account, validator or not
    pub fn bls_public_key(&self, account: &AccountId) -> BlsPublicKey {
        self.state.read().keys.get_key(account)
    }

    /// Number of accounts with a non-zero balance
    pub fn staker_count(&self) -> usize {
        self.state.read().ledger.staker_count()
    }

    fn deposit(&self, account: AccountId, amount: Amount, source: &'static str) -> RegistryResult<()> {
        let outcome = {
            let mut state = self.state.write();
            state
                .apply_stake(account, amount)
                .map(|receipt| (receipt, state.validators.len()))
        };

        let (receipt, validator_count) = outcome.map_err(|e| {
            self.reject("stake", &account, &e);
            e
        })?;

        if receipt.admitted {
            info!(
                account = %account,
                validators = validator_count,
                "Validator admitted"
            );
            metrics::set_validator_count(validator_count);
        }

        info!(
            account = %account,
            amount = %format_ether(amount),
            balance = %format_ether(receipt.balance),
            source,
            "Stake accepted"
        );
        metrics::record_stake();

        self.publish(RegistryEvent::Staked { account, amount });
        Ok(())
    }

    fn reject(&self, operation: &'static str, account: &AccountId, err: &RegistryError) {
        warn!(
            operation,
            account = %account,
            reason = err.label(),
            "Registry call rejected: {}",
            err
        );
        metrics::record_rejection(err.label());
    }

    fn publish(&self, event: RegistryEvent) {
        let name = event.name();
        if let Err(e) = self.event_bus.publish(event) {
            warn!(event = name, error = %e, "Failed to publish registry event");
        }
    }
}

impl<T, E> StakingApi for StakingRegistryService<T, E>
where
    T: ValueTransfer,
    E: EventBus,
{
    fn stake(&self, account: AccountId, amount: Amount) -> RegistryResult<()> {
        self.deposit(account, amount, "stake")
    }

    fn receive_transfer(&self, account: AccountId, amount: Amount) -> RegistryResult<()> {
        self.deposit(account, amount, "transfer")
    }

    fn unstake(&self, account: AccountId) -> RegistryResult<Amount> {
        // Phase 1: commit. The lock is dropped before any outbound call.
        let outcome = {
            let mut state = self.state.write();
            state
                .apply_unstake(account)
                .map(|withdrawal| (withdrawal, state.validators.len()))
        };

        let (withdrawal, validator_count) = outcome.map_err(|e| {
            self.reject("unstake", &account, &e);
            e
        })?;

        if withdrawal.removal.is_some() {
            info!(
                account = %account,
                validators = validator_count,
                "Validator removed"
            );
        }

        // Phase 2: payout
        if let Err(reason) = self.transfer.transfer(account, withdrawal.amount) {
            match self.state.write().revert_unstake(&withdrawal) {
                Ok(true) => debug!(account = %account, "Withdrawal reverted"),
                Ok(false) => warn!(
                    account = %account,
                    "Withdrawal reverted but validator set is full, account kept as staker"
                ),
                Err(e) => error!(account = %account, error = %e, "Failed to revert withdrawal"),
            }

            let err = RegistryError::TransferFailed {
                account,
                amount: withdrawal.amount,
                reason,
            };
            self.reject("unstake", &account, &err);
            metrics::set_validator_count(self.state.read().validators.len());
            return Err(err);
        }

        if withdrawal.removal.is_some() {
            metrics::set_validator_count(validator_count);
        }
        info!(
            account = %account,
            amount = %format_ether(withdrawal.amount),
            "Stake withdrawn"
        );
        metrics::record_unstake();

        self.publish(RegistryEvent::Unstaked {
            account,
            amount: withdrawal.amount,
        });
        Ok(withdrawal.amount)
    }

    fn register_bls_public_key(&self, account: AccountId, key: BlsPublicKey) {
        self.state.write().register_key(account, key.clone());
        debug!(account = %account, key_len = key.as_bytes().len(), "BLS public key registered");
        self.publish(RegistryEvent::BlsPublicKeyRegistered { account, key });
    }

    fn staked_amount(&self) -> Amount {
        self.state.read().ledger.total_staked()
    }

    fn account_stake(&self, account: &AccountId) -> Amount {
        self.state.read().ledger.balance_of(account)
    }

    fn is_validator(&self, account: &AccountId) -> bool {
        self.state.read().validators.is_member(account)
    }

    fn minimum_num_validators(&self) -> usize {
        self.config.min_validators
    }

    fn maximum_num_validators(&self) -> usize {
        self.config.max_validators
    }

    fn validators(&self) -> Vec<AccountId> {
        self.state.read().validators.snapshot()
    }

    fn validator_bls_public_keys(&self) -> Vec<BlsPublicKey> {
        self.state.read().validator_keys()
    }
}
