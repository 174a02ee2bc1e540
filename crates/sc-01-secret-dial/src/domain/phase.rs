//! # Dial Phase
//!
//! State machine of one dial sequence:
//!
//! ```text
//! Idle → Dialing ─┬─→ Connected → HandshakeInProgress ─┬─→ Secured
//!                 │                                     └─→ Failed
//!                 └─→ Aborted
//! ```
//!
//! A failed connect keeps the sequence in `Dialing`. Cancellation is only
//! observed while `Dialing`, between attempts.

use std::fmt;
use std::time::Duration;

use tracing::trace;

use super::retry::RetryState;

/// Phase of a dial sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialPhase {
    /// Not started.
    Idle,
    /// Waiting for or running connection attempts.
    Dialing,
    /// Raw stream open, handshake not started yet.
    Connected,
    /// Handshake running.
    HandshakeInProgress,
    /// Secure channel handed to the caller.
    Secured,
    /// Handshake failed.
    Failed,
    /// Cancelled before a connection was secured.
    Aborted,
}

impl DialPhase {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: DialPhase) -> bool {
        use DialPhase::*;
        matches!(
            (self, next),
            (Idle, Dialing)
                | (Dialing, Dialing)
                | (Dialing, Connected)
                | (Dialing, Aborted)
                | (Connected, HandshakeInProgress)
                | (HandshakeInProgress, Secured)
                | (HandshakeInProgress, Failed)
        )
    }

    /// `Secured`, `Failed` and `Aborted` end the sequence.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Secured | Self::Failed | Self::Aborted)
    }
}

impl fmt::Display for DialPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Dialing => "dialing",
            Self::Connected => "connected",
            Self::HandshakeInProgress => "handshake",
            Self::Secured => "secured",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Phase plus retry bookkeeping for one `connect` call.
#[derive(Clone, Debug)]
pub struct DialSequence {
    phase: DialPhase,
    retry: RetryState,
}

impl DialSequence {
    /// New sequence in `Idle`.
    pub fn new(steady_interval: Duration) -> Self {
        Self {
            phase: DialPhase::Idle,
            retry: RetryState::new(steady_interval),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DialPhase {
        self.phase
    }

    /// Retry bookkeeping.
    pub fn retry(&self) -> &RetryState {
        &self.retry
    }

    /// `Idle → Dialing`.
    pub fn begin(&mut self) {
        self.transition(DialPhase::Dialing);
    }

    /// Count the attempt about to run. Returns its 1-based number.
    pub fn record_attempt(&mut self) -> u64 {
        self.retry.record_attempt()
    }

    /// A connect failed; stay in `Dialing`. Returns the next delay.
    pub fn attempt_failed(&mut self) -> Duration {
        self.transition(DialPhase::Dialing);
        self.retry.record_failure()
    }

    /// `Dialing → Connected`.
    pub fn connected(&mut self) {
        self.transition(DialPhase::Connected);
    }

    /// `Connected → HandshakeInProgress`.
    pub fn handshake_started(&mut self) {
        self.transition(DialPhase::HandshakeInProgress);
    }

    /// `HandshakeInProgress → Secured`.
    pub fn secured(&mut self) {
        self.transition(DialPhase::Secured);
    }

    /// `HandshakeInProgress → Failed`.
    pub fn failed(&mut self) {
        self.transition(DialPhase::Failed);
    }

    /// `Dialing → Aborted`.
    pub fn aborted(&mut self) {
        self.retry.mark_cancelled();
        self.transition(DialPhase::Aborted);
    }

    fn transition(&mut self, next: DialPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal dial transition {} -> {}",
            self.phase,
            next
        );
        trace!(from = %self.phase, to = %next, "[sc-01] dial phase");
        self.phase = next;
    }
}
