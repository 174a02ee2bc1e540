//! # Block Signature Service
//!
//! Fetch, decode and surface the commit signatures of one block.

use async_trait::async_trait;
use shared_types::NodeAddress;
use tracing::{debug, info};

use crate::algorithms::decode_block_result;
use crate::config::RpcConfig;
use crate::domain::{
    BlockQuery, BlockQueryError, CommitSignature, CommitSignatureSet, FetchContext,
};
use crate::ports::{BlockSignatureApi, BlockSource};

/// Block Signature Service - composes a block source with the decoder.
pub struct BlockSignatureService<S: BlockSource> {
    source: S,
    config: RpcConfig,
}

impl<S: BlockSource> BlockSignatureService<S> {
    /// Create a new service.
    pub fn new(source: S, config: RpcConfig) -> Self {
        Self { source, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Underlying block source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Commit signatures of the block at `height`, bounded by the configured
    /// request timeout.
    pub async fn signatures_at(
        &self,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError> {
        self.signatures_at_with(&self.config.fetch_context(), node, height)
            .await
    }

    /// Commit signatures of the block at `height` under `ctx`.
    pub async fn signatures_at_with(
        &self,
        ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError> {
        let query = BlockQuery::new(node.clone(), height)?;

        let raw = self
            .source
            .fetch_block(ctx, query.node(), query.height())
            .await?;
        let signatures = decode_block_result(&raw)?.into_signatures()?;
        debug!(
            node = %node,
            height,
            signatures = signatures.len(),
            "[sc-02] Decoded commit signatures"
        );
        Ok(signatures)
    }

    /// The signature `validator_address` left in the block at `height`.
    pub async fn confirm_signature(
        &self,
        node: &NodeAddress,
        height: u64,
        validator_address: &[u8],
    ) -> Result<Option<CommitSignature>, BlockQueryError> {
        let signatures = self.signatures_at(node, height).await?;
        let found = signatures.find_by_validator(validator_address).cloned();
        info!(
            node = %node,
            height,
            validator = %hex::encode_upper(validator_address),
            included = found.is_some(),
            "[sc-02] Signature confirmation"
        );
        Ok(found)
    }
}

#[async_trait]
impl<S: BlockSource> BlockSignatureApi for BlockSignatureService<S> {
    async fn signatures_at(
        &self,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError> {
        BlockSignatureService::signatures_at(self, node, height).await
    }

    async fn signatures_at_with(
        &self,
        ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<CommitSignatureSet, BlockQueryError> {
        BlockSignatureService::signatures_at_with(self, ctx, node, height).await
    }

    async fn confirm_signature(
        &self,
        node: &NodeAddress,
        height: u64,
        validator_address: &[u8],
    ) -> Result<Option<CommitSignature>, BlockQueryError> {
        BlockSignatureService::confirm_signature(self, node, height, validator_address).await
    }
}
