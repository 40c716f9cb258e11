//! Domain module for the Staking Registry
//!
//! ## Core Modules
//! - account: Account identity, amounts and key blobs
//! - ledger: Per-account stake balances
//! - validator_set: Bounded validator membership with swap-removal
//! - key_registry: BLS public key blobs
//! - units: Native unit constants and decimal parsing

pub mod account;
pub mod key_registry;
pub mod ledger;
pub mod units;
pub mod validator_set;

pub use account::{AccountId, Amount, BlsPublicKey};
pub use key_registry::KeyRegistry;
pub use ledger::StakeLedger;
pub use units::{ether, format_ether, parse_ether, VALIDATOR_THRESHOLD, WEI_PER_ETHER};
pub use validator_set::{Removal, ValidatorSet};
