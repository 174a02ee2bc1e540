//! OS Signal Adapter
//!
//! Turns SIGINT/SIGTERM (Ctrl+C on non-unix targets) into a
//! [`CancelSource::cancel`] call. The supervisor itself only ever sees the
//! resulting [`CancelSignal`](shared_types::CancelSignal).

use std::io;

use shared_types::CancelSource;
use tokio::task::JoinHandle;
use tracing::info;

/// Forwards process termination signals to a cancel source.
#[derive(Debug)]
pub struct OsSignalSource;

impl OsSignalSource {
    /// Spawn a listener that fires `source` on the first SIGINT or SIGTERM.
    ///
    /// The handlers are registered before this returns. A registration
    /// failure comes back as `Err` and `source` is dropped without firing,
    /// so the caller can fall back to its own shutdown path.
    ///
    /// Must be called from within a tokio runtime.
    pub fn install(source: CancelSource) -> io::Result<JoinHandle<()>> {
        let termination = Termination::register()?;
        Ok(tokio::spawn(async move {
            let name = termination.recv().await;
            info!("[sc-01] Received {}, aborting", name);
            source.cancel();
        }))
    }
}

#[cfg(unix)]
struct Termination {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Termination {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(windows)]
struct Termination {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Termination {
    fn register() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "Ctrl+C"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_listener_does_not_fire_on_its_own() {
        let source = CancelSource::new();
        let signal = source.subscribe();
        let handle = OsSignalSource::install(source.clone()).unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!signal.is_cancelled());
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[tokio::test]
    async fn test_install_registers_handlers_before_returning() {
        let source = CancelSource::new();
        let signal = source.subscribe();

        let handle = OsSignalSource::install(source).expect("handlers should register");

        assert!(!handle.is_finished());
        assert!(!signal.is_cancelled());
        handle.abort();
    }
}
