//! # Ports Layer (Hexagonal Architecture)
//!
//! - Inbound: [`BlockSignatureApi`]
//! - Outbound: [`BlockSource`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
