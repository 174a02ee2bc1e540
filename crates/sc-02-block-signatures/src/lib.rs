//! # SC-02 Block Signatures
//!
//! Reads a block from the node's RPC listener and extracts the commit
//! signatures it carries, as evidence for double-sign detection and
//! signature confirmation.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Query Path
//!
//! ```text
//! NodeAddress + height
//!     │  HttpBlockFetcher: GET http(s)://host:port/block?height=N
//!     ▼
//! raw body
//!     │  decode_block_result
//!     ▼
//! BlockResultEnvelope ──into_signatures──▶ CommitSignatureSet | Rpc error
//! ```
//!
//! ## Failure Classes
//!
//! | Error | Meaning |
//! |-------|---------|
//! | `Transport` | Node unreachable or broken HTTP |
//! | `Timeout` | Fetch deadline elapsed or cancel signal fired |
//! | `Malformed` | Body is not a valid block result envelope |
//! | `Rpc` | Node answered with an error envelope (e.g. height past the tip) |
//! | `InvalidHeight` / `InvalidAddress` | Rejected before any request |
//!
//! Nothing in this crate retries. Every failure is returned to the caller.
//!
//! ## Module Structure
//!
//! ```text
//! sc-02-block-signatures/
//! ├── domain/          # BlockQuery, FetchContext, envelope, CommitSignatureSet, errors
//! ├── algorithms/      # decode_block_result, conflicting_signers
//! ├── ports/           # BlockSignatureApi (inbound), BlockSource (outbound)
//! ├── adapters/        # HttpBlockFetcher
//! ├── application/     # BlockSignatureService
//! └── config.rs        # RpcConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HttpBlockFetcher;
pub use algorithms::{conflicting_signers, decode_block_result};
pub use application::BlockSignatureService;
pub use config::{ConfigError, RpcConfig};
pub use domain::{
    BlockIdFlag, BlockQuery, BlockQueryError, BlockResultEnvelope, CommitSignature,
    CommitSignatureSet, EnvelopeOutcome, ExpiryReason, FetchContext, RpcErrorPayload,
};
pub use ports::{BlockSignatureApi, BlockSource, MockBlockSource};
pub use shared_types::{cancel_pair, CancelSignal, CancelSource, NodeAddress};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
