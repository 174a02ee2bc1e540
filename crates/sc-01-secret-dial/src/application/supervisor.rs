//! # Dial Supervisor
//!
//! Turns repeated connection attempts plus one handshake into a single
//! abortable operation.
//!
//! Each loop iteration races the cancel signal against the backoff timer
//! (cancel is polled first), then runs one connect attempt to completion.
//! Cancellation is therefore observed between attempts, never inside a
//! connect or a handshake.

use async_trait::async_trait;
use shared_types::CancelSignal;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, DialConfig};
use crate::domain::{DialError, DialSequence, DialTarget, IdentityKey};
use crate::ports::{SecretDialApi, SecureHandshake, StreamConnector};

/// Dial supervisor - retries connects forever, handshakes once.
pub struct DialSupervisor<C, H> {
    connector: C,
    handshake: H,
    config: DialConfig,
}

impl<C, H> DialSupervisor<C, H>
where
    C: StreamConnector,
    H: SecureHandshake<C::Stream>,
{
    /// Create a new supervisor.
    ///
    /// Fails with [`ConfigError::Invalid`] for a zero retry interval or
    /// connect timeout.
    pub fn new(connector: C, handshake: H, config: DialConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            connector,
            handshake,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Parse `raw_target` (`[scheme://]host:port`) and [`connect`](Self::connect).
    pub async fn connect_to(
        &self,
        raw_target: &str,
        identity: &IdentityKey,
        cancel: CancelSignal,
    ) -> Result<H::Channel, DialError> {
        let target = DialTarget::parse(raw_target)?;
        self.connect(&target, identity, cancel).await
    }

    /// Dial `target` until a connect succeeds, then secure the stream.
    ///
    /// - Connect failures are retried without limit: the first attempt is
    ///   immediate, later ones wait `retry_interval_ms`.
    /// - A handshake failure ends the sequence with
    ///   [`DialError::HandshakeFailed`]; the target is not dialed again.
    /// - `cancel` firing (or every source of it being dropped) ends the
    ///   sequence with [`DialError::Aborted`] at the next loop boundary.
    pub async fn connect(
        &self,
        target: &DialTarget,
        identity: &IdentityKey,
        mut cancel: CancelSignal,
    ) -> Result<H::Channel, DialError> {
        let mut sequence = DialSequence::new(self.config.retry_interval());
        sequence.begin();
        info!("[sc-01] Dialing {}... (Use Ctrl+C to abort)", target);

        loop {
            let delay = sequence.retry().current_delay();
            let cancelled = if delay.is_zero() {
                cancel.is_cancelled()
            } else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => true,
                    _ = tokio::time::sleep(delay) => false,
                }
            };

            if cancelled {
                sequence.aborted();
                let attempts = sequence.retry().attempts();
                warn!(attempts, "[sc-01] Dialing {} aborted", target);
                return Err(DialError::Aborted { attempts });
            }

            let attempt = sequence.record_attempt();
            match self.connector.connect(target).await {
                Ok(stream) => {
                    sequence.connected();
                    info!(attempt, "[sc-01] Successfully dialed the validator at {} ✓", target);
                    return self.secure(&mut sequence, target, stream, identity).await;
                }
                Err(e) => {
                    let retry_in_ms = sequence.attempt_failed().as_millis() as u64;
                    debug!(
                        attempt,
                        retry_in_ms,
                        "[sc-01] Retry dialing {} ({})...",
                        target,
                        e
                    );
                }
            }
        }
    }

    async fn secure(
        &self,
        sequence: &mut DialSequence,
        target: &DialTarget,
        stream: C::Stream,
        identity: &IdentityKey,
    ) -> Result<H::Channel, DialError> {
        sequence.handshake_started();
        match self.handshake.authenticate(stream, identity).await {
            Ok(channel) => {
                sequence.secured();
                info!(
                    local_key = %identity.public_key_hex(),
                    "[sc-01] Secret connection with {} established",
                    target
                );
                Ok(channel)
            }
            Err(source) => {
                sequence.failed();
                error!("[sc-01] Secret handshake with {} failed: {}", target, source);
                Err(DialError::HandshakeFailed {
                    target: target.to_string(),
                    source,
                })
            }
        }
    }
}

#[async_trait]
impl<C, H> SecretDialApi for DialSupervisor<C, H>
where
    C: StreamConnector,
    H: SecureHandshake<C::Stream>,
{
    type Channel = H::Channel;

    async fn connect(
        &self,
        target: &DialTarget,
        identity: &IdentityKey,
        cancel: CancelSignal,
    ) -> Result<Self::Channel, DialError> {
        DialSupervisor::connect(self, target, identity, cancel).await
    }
}
