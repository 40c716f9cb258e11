//! Published events (Outgoing)
//!
//! Emitted synchronously after the state change they describe has been
//! committed. Indexers, dashboards and the consensus layer subscribe to them.

use crate::domain::{AccountId, Amount, BlsPublicKey};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// Deposit accepted (explicit stake or plain transfer)
    Staked { account: AccountId, amount: Amount },
    /// Full withdrawal paid out
    Unstaked { account: AccountId, amount: Amount },
    /// Key blob stored for the account
    BlsPublicKeyRegistered {
        account: AccountId,
        key: BlsPublicKey,
    },
}

impl RegistryEvent {
    pub fn account(&self) -> AccountId {
        match self {
            Self::Staked { account, .. }
            | Self::Unstaked { account, .. }
            | Self::BlsPublicKeyRegistered { account, .. } => *account,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Staked { .. } => "Staked",
            Self::Unstaked { .. } => "Unstaked",
            Self::BlsPublicKeyRegistered { .. } => "BLSPublicKeyRegistered",
        }
    }
}
