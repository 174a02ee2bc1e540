//! # Inbound Ports
//!
//! What the secret dial subsystem offers to the signing controller.

use async_trait::async_trait;
use shared_types::CancelSignal;

use crate::domain::{DialError, DialTarget, IdentityKey};

/// Secret Dial API - inbound port.
#[async_trait]
pub trait SecretDialApi: Send + Sync {
    /// Secure channel handed to the caller on success.
    type Channel: Send;

    /// Dial `target` until it answers, then run one handshake with `identity`.
    ///
    /// Returns [`DialError::Aborted`] once `cancel` fires (checked between
    /// attempts) and [`DialError::HandshakeFailed`] if the handshake fails.
    /// Without a cancel this never returns while the target is unreachable.
    async fn connect(
        &self,
        target: &DialTarget,
        identity: &IdentityKey,
        cancel: CancelSignal,
    ) -> Result<Self::Channel, DialError>;
}
