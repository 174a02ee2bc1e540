//! # Algorithms Module
//!
//! Envelope decoding and signature set comparison.

pub mod compare;
pub mod decode;

pub use compare::conflicting_signers;
pub use decode::decode_block_result;
