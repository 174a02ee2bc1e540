//! # SC-01 Secret Dial
//!
//! Dials the validator's privval listener until it answers, then upgrades the
//! raw stream into an authenticated, encrypted channel.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Retry Policy
//!
//! | Event | Reaction |
//! |-------|----------|
//! | First attempt | Fires immediately, no delay |
//! | Connect fails | Wait `retry_interval_ms`, dial again, forever |
//! | Connect succeeds | Run the handshake exactly once |
//! | Handshake fails | Return `HandshakeFailed`, no re-dial |
//! | Cancel signal | Return `Aborted` at the next loop boundary |
//!
//! There is **no attempt or time ceiling**. A dial sequence against an
//! unreachable validator only ends through its [`CancelSignal`]; wire one up
//! (see [`OsSignalSource`]) or the call never returns.
//!
//! ## Module Structure
//!
//! ```text
//! sc-01-secret-dial/
//! ├── domain/          # IdentityKey, RetryState, DialPhase/DialSequence, errors
//! ├── ports/           # SecretDialApi (inbound), StreamConnector + SecureHandshake (outbound)
//! ├── adapters/        # TcpConnector, OsSignalSource
//! ├── application/     # DialSupervisor
//! └── config.rs        # DialConfig
//! ```
//!
//! [`CancelSignal`]: shared_types::CancelSignal

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{OsSignalSource, TcpConnector};
pub use application::DialSupervisor;
pub use config::{ConfigError, DialConfig};
pub use domain::{
    ConnectError, DialError, DialPhase, DialSequence, DialTarget, HandshakeError, IdentityKey,
    KeyError, RetryState,
};
pub use ports::{
    MockChannel, MockConnector, MockHandshake, MockStream, SecretDialApi, SecureHandshake,
    StreamConnector,
};
pub use shared_types::{cancel_pair, CancelSignal, CancelSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
