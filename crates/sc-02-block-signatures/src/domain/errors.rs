//! # Domain Errors
//!
//! Every failure of a block query surfaces immediately as a
//! [`BlockQueryError`]; nothing in this crate retries.

use std::fmt;

use shared_types::AddressError;
use thiserror::Error;

/// Why a fetch stopped waiting for the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// The fetch deadline elapsed.
    DeadlineElapsed {
        /// Deadline that was configured.
        after_ms: u64,
    },
    /// The caller's cancel signal fired.
    Cancelled,
}

impl fmt::Display for ExpiryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadlineElapsed { after_ms } => write!(f, "deadline of {}ms elapsed", after_ms),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Block query errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockQueryError {
    /// The node could not be reached or spoke broken HTTP.
    #[error("transport error talking to {node}: {reason}")]
    Transport {
        /// Node that was queried.
        node: String,
        /// Underlying failure.
        reason: String,
    },

    /// The fetch context expired before the body arrived.
    #[error("block query timed out: {reason}")]
    Timeout {
        /// Deadline or cancellation.
        reason: ExpiryReason,
    },

    /// The body is not a well-formed block result envelope.
    #[error("malformed block result: {0}")]
    Malformed(String),

    /// The node answered with a JSON-RPC error envelope.
    #[error("node returned RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
        /// Optional detail, e.g. the requested height vs. the chain tip.
        data: Option<String>,
    },

    /// Heights start at 1.
    #[error("invalid block height {0}: must be positive")]
    InvalidHeight(u64),

    /// The node address did not parse.
    #[error("invalid node address: {0}")]
    InvalidAddress(#[from] AddressError),
}

impl BlockQueryError {
    /// True for [`BlockQueryError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True for [`BlockQueryError::Transport`].
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
