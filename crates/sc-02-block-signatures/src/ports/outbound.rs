//! # Outbound Ports
//!
//! The node's query endpoint, seen as a source of raw `/block` bodies.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::NodeAddress;

use crate::domain::{BlockQueryError, FetchContext};

/// Block source - outbound port.
///
/// One call is one request; no retries.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch the raw response body for `GET /block?height=<height>`.
    async fn fetch_block(
        &self,
        ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<Vec<u8>, BlockQueryError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// In-memory block source keyed by height.
///
/// Heights without a stored body fail with a transport error, like an
/// unreachable node.
#[derive(Clone, Debug, Default)]
pub struct MockBlockSource {
    bodies: Arc<Mutex<HashMap<u64, Vec<u8>>>>,
    requests: Arc<Mutex<Vec<u64>>>,
}

impl MockBlockSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `height`.
    pub fn with_body(self, height: u64, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.lock().insert(height, body.into());
        self
    }

    /// Heights requested so far, in order.
    pub fn requested_heights(&self) -> Vec<u64> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl BlockSource for MockBlockSource {
    async fn fetch_block(
        &self,
        _ctx: &FetchContext,
        node: &NodeAddress,
        height: u64,
    ) -> Result<Vec<u8>, BlockQueryError> {
        self.requests.lock().push(height);
        self.bodies
            .lock()
            .get(&height)
            .cloned()
            .ok_or_else(|| BlockQueryError::Transport {
                node: node.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}
