//! # Retry State
//!
//! Backoff bookkeeping for one dial sequence.
//!
//! The schedule has two steps: the first attempt fires with zero delay, and
//! after the first failure every further attempt waits the steady interval.
//! The delay never goes back down within a sequence.

use std::time::Duration;

/// Attempts, current delay and cancellation flag of one dial sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryState {
    attempts: u64,
    current_delay: Duration,
    steady_interval: Duration,
    cancelled: bool,
}

impl RetryState {
    /// Fresh state: no attempts yet, first attempt is immediate.
    pub fn new(steady_interval: Duration) -> Self {
        Self {
            attempts: 0,
            current_delay: Duration::ZERO,
            steady_interval,
            cancelled: false,
        }
    }

    /// Delay to wait before the next attempt.
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// Interval used after the first failure.
    pub fn steady_interval(&self) -> Duration {
        self.steady_interval
    }

    /// Count an attempt that is about to start. Returns its 1-based number.
    pub fn record_attempt(&mut self) -> u64 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Escalate after a failed attempt. Returns the delay before the next one.
    pub fn record_failure(&mut self) -> Duration {
        self.current_delay = self.current_delay.max(self.steady_interval);
        self.current_delay
    }

    /// Flag the sequence as cancelled.
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Whether the sequence was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_attempt_is_immediate() {
        let state = RetryState::new(Duration::from_secs(1));
        assert_eq!(state.current_delay(), Duration::ZERO);
        assert_eq!(state.attempts(), 0);
        assert!(!state.is_cancelled());
    }

    #[test]
    fn test_failure_escalates_to_steady_interval() {
        let mut state = RetryState::new(Duration::from_secs(1));
        assert_eq!(state.record_attempt(), 1);
        assert_eq!(state.record_failure(), Duration::from_secs(1));
        assert_eq!(state.record_attempt(), 2);
        assert_eq!(state.record_failure(), Duration::from_secs(1));
        assert_eq!(state.attempts(), 2);
    }

    #[test]
    fn test_mark_cancelled() {
        let mut state = RetryState::new(Duration::from_millis(10));
        state.mark_cancelled();
        assert!(state.is_cancelled());
    }

    proptest! {
        #[test]
        fn prop_delay_never_decreases(interval_ms in 0u64..10_000, failures in 1usize..50) {
            let mut state = RetryState::new(Duration::from_millis(interval_ms));
            let mut previous = state.current_delay();
            for _ in 0..failures {
                state.record_attempt();
                let next = state.record_failure();
                prop_assert!(next >= previous);
                prop_assert_eq!(next, Duration::from_millis(interval_ms));
                previous = next;
            }
        }
    }
}
