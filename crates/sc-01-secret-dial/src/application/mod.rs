//! # Application Layer
//!
//! Dial supervisor orchestrating connector, handshake and cancellation.

pub mod supervisor;

pub use supervisor::DialSupervisor;
