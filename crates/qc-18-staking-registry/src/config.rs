//! Registry configuration
//!
//! Fixed at construction; the service never mutates it afterwards.

use crate::domain::{parse_ether, Amount, VALIDATOR_THRESHOLD};
use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default validator floor
pub const DEFAULT_MIN_VALIDATORS: usize = 4;

/// Default validator capacity
pub const DEFAULT_MAX_VALIDATORS: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Validator count below which no validator may exit
    pub min_validators: usize,
    /// Hard capacity of the validator set
    pub max_validators: usize,
    /// Minimum balance for admission, in smallest units
    pub threshold: Amount,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_validators: DEFAULT_MIN_VALIDATORS,
            max_validators: DEFAULT_MAX_VALIDATORS,
            threshold: VALIDATOR_THRESHOLD,
        }
    }
}

impl RegistryConfig {
    /// Validated config with the deployment threshold.
    pub fn new(min_validators: usize, max_validators: usize) -> RegistryResult<Self> {
        let config = Self {
            min_validators,
            max_validators,
            threshold: VALIDATOR_THRESHOLD,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: Amount) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> RegistryResult<()> {
        if self.min_validators > self.max_validators {
            return Err(RegistryError::InvalidConfig {
                reason: format!(
                    "Min validators num can not be greater than max num of validators ({} > {})",
                    self.min_validators, self.max_validators
                ),
            });
        }
        if self.threshold == 0 {
            return Err(RegistryError::InvalidConfig {
                reason: "validator threshold must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_STAKING_MIN_VALIDATORS`: validator floor (default: 4)
    /// - `QC_STAKING_MAX_VALIDATORS`: validator capacity (default: 6)
    /// - `QC_STAKING_THRESHOLD`: admission threshold in whole units, decimals
    ///   allowed (default: 10000000)
    pub fn from_env() -> RegistryResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_var("QC_STAKING_MIN_VALIDATORS") {
            config.min_validators = parse_count("QC_STAKING_MIN_VALIDATORS", &raw)?;
        }
        if let Some(raw) = read_var("QC_STAKING_MAX_VALIDATORS") {
            config.max_validators = parse_count("QC_STAKING_MAX_VALIDATORS", &raw)?;
        }
        if let Some(raw) = read_var("QC_STAKING_THRESHOLD") {
            config.threshold = parse_ether(&raw).map_err(|e| RegistryError::InvalidConfig {
                reason: format!("QC_STAKING_THRESHOLD: {}", e),
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_count(key: &str, raw: &str) -> RegistryResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| RegistryError::InvalidConfig {
            reason: format!("{}: expected a validator count, got {:?}", key, raw),
        })
}
