//! # Domain Errors
//!
//! Error types for the secret dial subsystem.
//!
//! Only [`DialError`] escapes [`DialSupervisor::connect`]. A [`ConnectError`]
//! is absorbed by the retry loop; a [`HandshakeError`] ends the sequence and
//! comes back wrapped in [`DialError::HandshakeFailed`].
//!
//! [`DialSupervisor::connect`]: crate::DialSupervisor::connect

use shared_types::AddressError;
use thiserror::Error;

/// Outcome of a dial sequence that did not yield a secure channel.
#[derive(Debug, Error)]
pub enum DialError {
    /// The cancel signal fired before a connection was secured.
    #[error("dialing aborted after {attempts} attempt(s)")]
    Aborted {
        /// Connection attempts made before the abort.
        attempts: u64,
    },

    /// The validator accepted the connection but the handshake failed.
    /// Terminal for this sequence; the caller decides whether to dial again.
    #[error("secret handshake with {target} failed: {source}")]
    HandshakeFailed {
        /// Target that was dialed.
        target: String,
        /// Failure reported by the handshake provider.
        source: HandshakeError,
    },

    /// The target string could not be parsed.
    #[error("invalid dial target: {0}")]
    InvalidTarget(#[from] AddressError),
}

impl DialError {
    /// True for [`DialError::Aborted`].
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// True for [`DialError::HandshakeFailed`].
    pub fn is_handshake_failure(&self) -> bool {
        matches!(self, Self::HandshakeFailed { .. })
    }
}

/// A single failed connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Nothing is listening on the target.
    #[error("connection to {target} refused")]
    Refused {
        /// Dialed address.
        target: String,
    },

    /// The connect did not complete within the configured timeout.
    #[error("connection to {target} timed out after {after_ms}ms")]
    TimedOut {
        /// Dialed address.
        target: String,
        /// Timeout that elapsed.
        after_ms: u64,
    },

    /// Any other socket error (unreachable, reset, DNS, ...).
    #[error("connection to {target} failed: {reason}")]
    Io {
        /// Dialed address.
        target: String,
        /// OS error description.
        reason: String,
    },
}

/// Failure reported by a [`SecureHandshake`](crate::SecureHandshake) provider.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// The peer's identity could not be authenticated.
    #[error("peer authentication failed: {0}")]
    Authentication(String),

    /// The stream broke during the handshake.
    #[error("handshake I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent something the protocol does not allow.
    #[error("handshake protocol violation: {0}")]
    Protocol(String),
}

/// Rejected identity key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Wrong number of bytes.
    #[error("identity key must be {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// The public half does not match the secret half.
    #[error("identity keypair is inconsistent: {0}")]
    Mismatch(String),
}
