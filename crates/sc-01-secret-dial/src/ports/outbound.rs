//! # Outbound Ports
//!
//! Dependencies of the dial supervisor: something that opens raw streams and
//! something that turns a raw stream into a secure channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::{ConnectError, DialTarget, HandshakeError, IdentityKey};

/// Stream connector - outbound port.
///
/// One call is one connection attempt; retrying is the supervisor's job.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    /// Raw duplex stream produced by a successful attempt.
    type Stream: Send + 'static;

    /// Try once to open a stream to `target`.
    async fn connect(&self, target: &DialTarget) -> Result<Self::Stream, ConnectError>;
}

/// Secure handshake provider - outbound port.
///
/// Mutual authentication and key agreement over a raw stream. Treated as
/// atomic: the supervisor never cancels it once started and never retries it.
#[async_trait]
pub trait SecureHandshake<S: Send + 'static>: Send + Sync {
    /// Authenticated, encrypted channel returned on success.
    type Channel: Send + 'static;

    /// Run the handshake over `stream` using the long-term `identity`.
    async fn authenticate(
        &self,
        stream: S,
        identity: &IdentityKey,
    ) -> Result<Self::Channel, HandshakeError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Stream handed out by [`MockConnector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockStream {
    /// 1-based attempt that produced this stream.
    pub attempt: u64,
}

/// Connector that fails a fixed number of times, then succeeds.
///
/// Records the (tokio) instant of every attempt so tests can check the
/// retry schedule under a paused clock.
#[derive(Clone, Debug)]
pub struct MockConnector {
    failures_before_success: u64,
    attempts: Arc<Mutex<Vec<Instant>>>,
}

impl MockConnector {
    /// Succeeds on the first attempt.
    pub fn succeeding() -> Self {
        Self::failing_first(0)
    }

    /// Refuses the first `failures` attempts.
    pub fn failing_first(failures: u64) -> Self {
        Self {
            failures_before_success: failures,
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Never succeeds.
    pub fn unreachable() -> Self {
        Self::failing_first(u64::MAX)
    }

    /// Attempts made so far.
    pub fn attempt_count(&self) -> u64 {
        self.attempts.lock().len() as u64
    }

    /// When each attempt started.
    pub fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl StreamConnector for MockConnector {
    type Stream = MockStream;

    async fn connect(&self, target: &DialTarget) -> Result<MockStream, ConnectError> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            attempts.push(Instant::now());
            attempts.len() as u64
        };

        if attempt <= self.failures_before_success {
            return Err(ConnectError::Refused {
                target: target.host_port(),
            });
        }
        Ok(MockStream { attempt })
    }
}

/// Channel produced by [`MockHandshake`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockChannel {
    /// Underlying stream.
    pub stream: MockStream,
    /// Public key of the identity the handshake was run with.
    pub local_public_key: [u8; 32],
}

/// Handshake that always succeeds or always fails, counting calls.
#[derive(Clone, Debug, Default)]
pub struct MockHandshake {
    fail: bool,
    calls: Arc<AtomicU64>,
}

impl MockHandshake {
    /// Always succeeds.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Always fails with an authentication error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handshakes attempted so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecureHandshake<MockStream> for MockHandshake {
    type Channel = MockChannel;

    async fn authenticate(
        &self,
        stream: MockStream,
        identity: &IdentityKey,
    ) -> Result<MockChannel, HandshakeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HandshakeError::Authentication(
                "mock peer rejected identity".to_string(),
            ));
        }
        Ok(MockChannel {
            stream,
            local_public_key: identity.public_key().to_bytes(),
        })
    }
}
