//! Adapters layer (Hexagonal Architecture)

mod event_bus;
mod value_transfer;

pub use event_bus::*;
pub use value_transfer::*;
