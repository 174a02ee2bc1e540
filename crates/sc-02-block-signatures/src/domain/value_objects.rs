//! # Value Objects
//!
//! Inputs of a single block query.

use std::time::Duration;

use shared_types::{CancelSignal, NodeAddress};

use super::errors::BlockQueryError;

/// A height-scoped query against one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockQuery {
    node: NodeAddress,
    height: u64,
}

impl BlockQuery {
    /// Build a query. Height 0 is rejected; heights past the chain tip are
    /// accepted and left for the node to refuse.
    pub fn new(node: NodeAddress, height: u64) -> Result<Self, BlockQueryError> {
        if height == 0 {
            return Err(BlockQueryError::InvalidHeight(height));
        }
        Ok(Self { node, height })
    }

    /// Parse `raw_node` and build a query.
    pub fn parse(raw_node: &str, height: u64) -> Result<Self, BlockQueryError> {
        Self::new(NodeAddress::parse(raw_node)?, height)
    }

    /// Node to query.
    pub fn node(&self) -> &NodeAddress {
        &self.node
    }

    /// Requested height.
    pub fn height(&self) -> u64 {
        self.height
    }
}

/// Bounds on one fetch: an optional deadline and an optional cancel signal.
///
/// Whichever expires first ends the fetch with
/// [`BlockQueryError::Timeout`]. An empty context waits for the node.
#[derive(Clone, Debug, Default)]
pub struct FetchContext {
    deadline: Option<Duration>,
    cancel: Option<CancelSignal>,
}

impl FetchContext {
    /// Context without deadline or cancel signal.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Context with a deadline.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// Attach a cancel signal.
    pub fn cancelled_by(mut self, cancel: CancelSignal) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Configured deadline.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Attached cancel signal.
    pub fn cancel(&self) -> Option<&CancelSignal> {
        self.cancel.as_ref()
    }
}
