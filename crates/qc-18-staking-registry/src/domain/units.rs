//! Native value units
//!
//! Amounts are carried in the smallest unit with 18 decimals, the same scale
//! the staking scripts use when they accept whole-unit strings like `"0.5"`.

use super::Amount;
use crate::error::{RegistryError, RegistryResult};

/// Decimal places of the native unit
pub const DECIMALS: usize = 18;

/// Smallest units per whole native unit
pub const WEI_PER_ETHER: Amount = 1_000_000_000_000_000_000;

/// Minimum balance for validator admission (10,000,000 whole units)
pub const VALIDATOR_THRESHOLD: Amount = 10_000_000 * WEI_PER_ETHER;

/// Whole units to smallest units, saturating on overflow.
pub const fn ether(whole: u64) -> Amount {
    (whole as Amount).saturating_mul(WEI_PER_ETHER)
}

/// Parse a decimal whole-unit string (`"1"`, `"0.5"`, `"10000000"`).
pub fn parse_ether(input: &str) -> RegistryResult<Amount> {
    let input = input.trim();
    let invalid = || RegistryError::InvalidAmount(input.to_string());

    let (whole, fraction) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > DECIMALS {
        return Err(invalid());
    }

    let whole_units: Amount = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    let fraction_units: Amount = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = DECIMALS);
        padded.parse().map_err(|_| invalid())?
    };

    whole_units
        .checked_mul(WEI_PER_ETHER)
        .and_then(|v| v.checked_add(fraction_units))
        .ok_or_else(invalid)
}

/// Render an amount as a decimal whole-unit string without trailing zeros.
pub fn format_ether(amount: Amount) -> String {
    let whole = amount / WEI_PER_ETHER;
    let fraction = amount % WEI_PER_ETHER;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", fraction, width = DECIMALS);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
