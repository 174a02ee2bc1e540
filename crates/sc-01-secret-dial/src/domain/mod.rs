//! # Domain Module
//!
//! Core types for the dial sequence.

pub mod errors;
pub mod identity;
pub mod phase;
pub mod retry;

pub use errors::*;
pub use identity::*;
pub use phase::*;
pub use retry::*;

/// Endpoint of the validator's privval listener, e.g. `tcp://127.0.0.1:26658`.
pub type DialTarget = shared_types::NodeAddress;
