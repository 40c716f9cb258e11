//! Driving Ports (API - Inbound)

use crate::domain::{AccountId, Amount, BlsPublicKey};
use crate::error::RegistryResult;

/// Primary Staking Registry API
///
/// `account` is the caller identity established by the surrounding
/// execution environment; the registry trusts it as given.
pub trait StakingApi: Send + Sync {
    /// Deposit `amount` for `account`, admitting it as a validator once its
    /// balance reaches the threshold.
    ///
    /// # Errors
    /// * `ZeroAmount` - nothing was sent
    /// * `CapacityExceeded` - admission needed but the set is full; the
    ///   deposit is not kept
    fn stake(&self, account: AccountId, amount: Amount) -> RegistryResult<()>;

    /// Plain value transfer into the registry. Same effect as [`stake`](Self::stake).
    fn receive_transfer(&self, account: AccountId, amount: Amount) -> RegistryResult<()>;

    /// Withdraw the full balance of `account` and leave the validator set.
    ///
    /// Returns the amount paid out.
    ///
    /// # Errors
    /// * `NotAStaker` - zero balance
    /// * `BelowMinimum` - the validator set is at its floor
    /// * `TransferFailed` - payout failed, the withdrawal was reverted
    fn unstake(&self, account: AccountId) -> RegistryResult<Amount>;

    /// Store the BLS public key blob of `account`. Always succeeds.
    fn register_bls_public_key(&self, account: AccountId, key: BlsPublicKey);

    /// Sum of all balances
    fn staked_amount(&self) -> Amount;

    fn account_stake(&self, account: &AccountId) -> Amount;

    fn is_validator(&self, account: &AccountId) -> bool;

    fn minimum_num_validators(&self) -> usize;

    fn maximum_num_validators(&self) -> usize;

    /// Validators in set order
    fn validators(&self) -> Vec<AccountId>;

    /// One key per validator, aligned with [`validators`](Self::validators)
    fn validator_bls_public_keys(&self) -> Vec<BlsPublicKey>;
}
