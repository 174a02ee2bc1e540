//! # Shared Errors
//!
//! Errors raised while parsing shared types.

use thiserror::Error;

/// Reasons a node address string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Nothing left after stripping the scheme.
    #[error("address is empty")]
    Empty,

    /// No `:port` suffix.
    #[error("address {0:?} has no port")]
    MissingPort(String),

    /// Port is not a number in `1..=65535`.
    #[error("address {0:?} has an invalid port")]
    InvalidPort(String),

    /// Nothing before the `:port` suffix.
    #[error("address {0:?} has no host")]
    MissingHost(String),

    /// IPv6 literal without the surrounding brackets.
    #[error("address {0:?} is an IPv6 literal without brackets")]
    UnbracketedIpv6(String),
}
