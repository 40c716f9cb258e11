//! Event types for the Staking Registry

pub mod published;

pub use published::RegistryEvent;
