//! # Inbound Ports
//!
//! What the block signature subsystem offers to the signing controller.

use async_trait::async_trait;
use shared_types::NodeAddress;

use crate::domain::{BlockQueryError, CommitSignature, CommitSignatureSet, FetchContext};

/// Block Signature API - inbound port.
#[async_trait]
pub trait BlockSignatureApi: Send + Sync {
    /// Commit signatures carried by the block at `height`.
    async fn signatures_at(
        &self,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError>;

    /// Same as [`signatures_at`](Self::signatures_at) under a caller context.
    async fn signatures_at_with(
        &self,
        ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError>;

    /// The signature of `validator_address` in the block at `height`, if
    /// the block includes one.
    async fn confirm_signature(
        &self,
        node: &NodeAddress,
        height: u64,
        validator_address: &[u8],
    ) -> Result<Option<CommitSignature>, BlockQueryError>;
}
