//! HTTP Block Fetcher Adapter
//!
//! Implements `BlockSource` with reqwest against the node's RPC listener.

use std::future;
use std::time::Duration;

use async_trait::async_trait;
use shared_types::{CancelSignal, NodeAddress};
use tracing::{debug, warn};

use crate::config::RpcConfig;
use crate::domain::{BlockQueryError, ExpiryReason, FetchContext};
use crate::ports::outbound::BlockSource;

/// Fetches `/block` bodies over HTTP.
///
/// `https://` node addresses use TLS; any other scheme (`tcp://`, `http://`
/// or none) is plain HTTP.
#[derive(Clone, Debug)]
pub struct HttpBlockFetcher {
    client: reqwest::Client,
}

impl HttpBlockFetcher {
    /// Fetcher sending the config's user agent.
    pub fn new(config: &RpcConfig) -> Self {
        // Builder only fails on TLS backend init; fall back to a plain client.
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn request(&self, node: &NodeAddress, height: u64) -> Result<Vec<u8>, BlockQueryError> {
        let url = block_url(node);
        let response = self
            .client
            .get(&url)
            .query(&[("height", height.to_string())])
            .send()
            .await
            .map_err(|e| transport(node, e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport(node, e))?;
        debug!(
            node = %node,
            height,
            status = status.as_u16(),
            bytes = body.len(),
            "[sc-02] Block response received"
        );

        if body.is_empty() && !status.is_success() {
            return Err(BlockQueryError::Transport {
                node: node.to_string(),
                reason: format!("HTTP {} with empty body", status),
            });
        }
        Ok(body.to_vec())
    }
}

impl Default for HttpBlockFetcher {
    fn default() -> Self {
        Self::new(&RpcConfig::default())
    }
}

#[async_trait]
impl BlockSource for HttpBlockFetcher {
    async fn fetch_block(
        &self,
        ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<Vec<u8>, BlockQueryError> {
        if height == 0 {
            return Err(BlockQueryError::InvalidHeight(height));
        }
        debug!(node = %node, height, "[sc-02] Querying block");

        let mut cancel = ctx.cancel().cloned();
        let result = tokio::select! {
            biased;
            _ = cancelled(cancel.as_mut()) => Err(BlockQueryError::Timeout {
                reason: ExpiryReason::Cancelled,
            }),
            _ = elapsed(ctx.deadline()) => Err(BlockQueryError::Timeout {
                reason: ExpiryReason::DeadlineElapsed {
                    after_ms: ctx.deadline().map(|d| d.as_millis() as u64).unwrap_or_default(),
                },
            }),
            result = self.request(node, height) => result,
        };

        if let Err(e) = &result {
            warn!(node = %node, height, "[sc-02] Block query failed: {}", e);
        }
        result
    }
}

/// `http(s)://host:port/block` for `node`.
pub(crate) fn block_url(node: &NodeAddress) -> String {
    let scheme = match node.scheme() {
        Some("https") => "https",
        _ => "http",
    };
    format!("{}://{}/block", scheme, node.host_port())
}

fn transport(node: &NodeAddress, err: reqwest::Error) -> BlockQueryError {
    BlockQueryError::Transport {
        node: node.to_string(),
        reason: err.to_string(),
    }
}

async fn cancelled(signal: Option<&mut CancelSignal>) {
    match signal {
        Some(signal) => signal.cancelled().await,
        None => future::pending().await,
    }
}

async fn elapsed(deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => tokio::time::sleep(deadline).await,
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::cancel_pair;

    fn node(raw: &str) -> NodeAddress {
        NodeAddress::parse(raw).unwrap()
    }

    #[test]
    fn test_block_url_scheme_selection() {
        assert_eq!(
            block_url(&node("tcp://127.0.0.1:26657")),
            "http://127.0.0.1:26657/block"
        );
        assert_eq!(
            block_url(&node("127.0.0.1:26657")),
            "http://127.0.0.1:26657/block"
        );
        assert_eq!(
            block_url(&node("https://rpc.example.net:443/")),
            "https://rpc.example.net:443/block"
        );
        assert_eq!(block_url(&node("tcp://[::1]:26657")), "http://[::1]:26657/block");
    }

    #[tokio::test]
    async fn test_zero_height_rejected_before_request() {
        let fetcher = HttpBlockFetcher::default();
        let err = fetcher
            .fetch_block(&FetchContext::unbounded(), &node("tcp://127.0.0.1:1"), 0)
            .await
            .unwrap_err();
        assert_eq!(err, BlockQueryError::InvalidHeight(0));
    }

    #[tokio::test]
    async fn test_fired_cancel_wins_before_request() {
        let (source, signal) = cancel_pair();
        source.cancel();
        let ctx = FetchContext::unbounded().cancelled_by(signal);

        let fetcher = HttpBlockFetcher::default();
        let err = fetcher
            .fetch_block(&ctx, &node("tcp://127.0.0.1:1"), 2)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BlockQueryError::Timeout {
                reason: ExpiryReason::Cancelled
            }
        );
    }
}
