//! Driven ports (Outbound dependencies)

use crate::domain::{AccountId, Amount};
use crate::events::RegistryEvent;

/// Native value-transfer primitive used to pay out withdrawals
///
/// # Reentrancy
/// The implementation may call back into the registry before returning.
/// The registry commits all internal state before calling `transfer`, so a
/// nested `unstake` for the same account observes a zero balance.
pub trait ValueTransfer: Send + Sync {
    /// Move `amount` from the registry to `to`
    fn transfer(&self, to: AccountId, amount: Amount) -> Result<(), String>;
}

/// Event bus for registry notifications
///
/// Delivery is synchronous and happens after commit. A failing subscriber
/// does not undo the operation that produced the event.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: RegistryEvent) -> Result<(), String>;
}
