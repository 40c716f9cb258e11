//! # qc-18-staking-registry
//!
//! Validator admission and staking registry for Quantum-Chain.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Stake Ledger**: Per-account balances and the running total
//! - **Validator Set**: Bounded, ordered membership admitted at a fixed
//!   stake threshold, with O(1) swap-removal
//! - **Key Registry**: Opaque BLS public key blobs, served in validator order
//!   to the consensus layer
//!
//! ## Account lifecycle
//!
//! ```text
//! [UNSTAKED] ──stake──→ [STAKED] ──stake (balance ≥ threshold)──→ [VALIDATOR]
//!     ↑                     │                                        │
//!     └──── unstake ────────┴──────────── unstake ──────────────────┘
//!                                (refused at the validator floor)
//! ```
//!
//! Withdrawals are always total. The validator set never exceeds
//! `max_validators` and a validator cannot exit while the set is at
//! `min_validators`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_18_staking_registry::{
//!     InMemoryEventBus, InMemoryValueTransfer, RegistryConfig, RegistryDependencies,
//!     StakingApi, StakingRegistryService, VALIDATOR_THRESHOLD,
//! };
//!
//! let registry = StakingRegistryService::new(RegistryDependencies {
//!     config: RegistryConfig::new(4, 6)?,
//!     transfer: Arc::new(InMemoryValueTransfer::new()),
//!     event_bus: Arc::new(InMemoryEventBus::new()),
//! })?;
//!
//! registry.stake(account, VALIDATOR_THRESHOLD)?;
//! assert!(registry.is_validator(&account));
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod state;
pub mod telemetry;

pub use adapters::{InMemoryEventBus, InMemoryValueTransfer};
pub use config::RegistryConfig;
pub use domain::{
    ether, format_ether, parse_ether, AccountId, Amount, BlsPublicKey, KeyRegistry, StakeLedger,
    ValidatorSet, VALIDATOR_THRESHOLD, WEI_PER_ETHER,
};
pub use error::{RegistryError, RegistryResult};
pub use events::RegistryEvent;
pub use ports::{EventBus, StakingApi, ValueTransfer};
pub use service::{RegistryDependencies, StakingRegistryService};
pub use telemetry::{init_tracing, TelemetryConfig, TelemetryError};
