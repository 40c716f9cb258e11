//! Ports layer (Hexagonal Architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::StakingApi;
pub use outbound::{EventBus, ValueTransfer};
