//! # Staking Registry Metrics
//!
//! Prometheus metrics for monitoring stake flow and validator set size.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-staking-registry = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `staking_registry_stakes_total` - Counter of accepted deposits
//! - `staking_registry_unstakes_total` - Counter of completed withdrawals
//! - `staking_registry_rejections_total` - Counter of rejected calls (by reason)
//! - `staking_registry_validator_count` - Current validator set size

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_int_counter, register_int_gauge, CounterVec, IntCounter,
    IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total accepted deposits
    pub static ref STAKES: IntCounter = register_int_counter!(
        "staking_registry_stakes_total",
        "Total number of accepted stake deposits"
    )
    .expect("Failed to create STAKES metric");

    /// Total completed withdrawals
    pub static ref UNSTAKES: IntCounter = register_int_counter!(
        "staking_registry_unstakes_total",
        "Total number of completed full withdrawals"
    )
    .expect("Failed to create UNSTAKES metric");

    /// Rejected calls, labeled by error
    pub static ref REJECTIONS: CounterVec = register_counter_vec!(
        "staking_registry_rejections_total",
        "Total number of rejected registry calls",
        &["reason"]
    )
    .expect("Failed to create REJECTIONS metric");

    /// Current validator set size
    pub static ref VALIDATOR_COUNT: IntGauge = register_int_gauge!(
        "staking_registry_validator_count",
        "Number of accounts currently in the validator set"
    )
    .expect("Failed to create VALIDATOR_COUNT metric");
}

#[cfg(feature = "metrics")]
pub fn record_stake() {
    STAKES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_unstake() {
    UNSTAKES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    REJECTIONS.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn set_validator_count(count: usize) {
    VALIDATOR_COUNT.set(count as i64);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_stake() {}

#[cfg(not(feature = "metrics"))]
pub fn record_unstake() {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_validator_count(_count: usize) {}
