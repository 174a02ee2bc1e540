//! # Cancellation Signal
//!
//! A one-shot abort flag on top of `tokio::sync::watch`, the same channel the
//! node runtime uses for its shutdown signal.
//!
//! The source side is held by whoever decides to abort (an OS signal adapter,
//! a supervisor task, a test). Any number of [`CancelSignal`]s can wait on it.
//! Once fired the flag never resets.
//!
//! When every [`CancelSource`] has been dropped without firing, waiting
//! signals resolve as if cancelled: nobody is left who could stop the
//! operation, so it must not run forever.

use std::sync::Arc;

use tokio::sync::watch;

/// Create a connected source/signal pair.
pub fn cancel_pair() -> (CancelSource, CancelSignal) {
    let source = CancelSource::new();
    let signal = source.subscribe();
    (source, signal)
}

/// Firing side of the cancellation flag.
#[derive(Clone, Debug)]
pub struct CancelSource {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSource {
    /// Create a new, unfired source.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fire the flag. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// New signal observing this source.
    pub fn subscribe(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Listening side of the cancellation flag.
#[derive(Clone, Debug)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Whether the flag has fired or every source is gone.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once the flag fires or every source is dropped.
    ///
    /// Cancel-safe: dropping the future inside `tokio::select!` loses nothing.
    pub async fn cancelled(&mut self) {
        // Err means the channel closed, which counts as cancellation.
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}
