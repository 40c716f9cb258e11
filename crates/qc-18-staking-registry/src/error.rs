//! Error types for the Staking Registry

use crate::domain::{AccountId, Amount};
use thiserror::Error;

/// Staking registry errors
///
/// Every rejected call is a full no-op: no ledger or validator set mutation
/// survives a returned error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Configuration rejected at construction time
    #[error("Invalid registry configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Unstake attempted by an account with zero balance
    #[error("Only staker can call function: {0} has no stake")]
    NotAStaker(AccountId),

    /// Removing the validator would breach the validator floor
    #[error("Validators can't be less than the minimum required validator num: {current} validators, minimum {minimum}")]
    BelowMinimum { current: usize, minimum: usize },

    /// Admission into a full validator set
    #[error("Validator set has reached full capacity: maximum {maximum}")]
    CapacityExceeded { maximum: usize },

    /// Removal of an account that is not in the validator set
    #[error("Account is not a validator: {0}")]
    NotMember(AccountId),

    /// Stake of zero value
    #[error("Stake amount must be greater than zero")]
    ZeroAmount,

    /// Deposit would overflow the account balance or the total stake
    #[error("Stake balance overflow for {0}")]
    BalanceOverflow(AccountId),

    /// Unparsable decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Outbound value transfer failed, unstake reverted
    #[error("Transfer of {amount} to {account} failed: {reason}")]
    TransferFailed {
        account: AccountId,
        amount: Amount,
        reason: String,
    },
}

impl RegistryError {
    /// Stable label for metrics and log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "invalid_config",
            Self::NotAStaker(_) => "not_a_staker",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::NotMember(_) => "not_member",
            Self::ZeroAmount => "zero_amount",
            Self::BalanceOverflow(_) => "balance_overflow",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::TransferFailed { .. } => "transfer_failed",
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
