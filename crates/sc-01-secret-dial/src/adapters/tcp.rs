//! TCP Connector Adapter
//!
//! Implements `StreamConnector` over tokio's `TcpStream`.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::trace;

use crate::config::{ConfigError, DialConfig};
use crate::domain::{ConnectError, DialTarget};
use crate::ports::outbound::StreamConnector;

/// Opens plain TCP connections to the validator.
#[derive(Clone, Debug)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Connector using the config's connect timeout.
    ///
    /// A zero timeout is rejected: every attempt would time out.
    pub fn new(config: &DialConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_timeout(config.connect_timeout()))
    }

    /// Connector with an explicit connect timeout.
    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::with_timeout(DialConfig::default().connect_timeout())
    }
}

#[async_trait]
impl StreamConnector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, target: &DialTarget) -> Result<TcpStream, ConnectError> {
        let host_port = target.host_port();
        trace!("[sc-01] TCP connect to {}", host_port);

        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&host_port))
            .await
            .map_err(|_| ConnectError::TimedOut {
                target: host_port.clone(),
                after_ms: self.connect_timeout.as_millis() as u64,
            })?
            .map_err(|e| map_io_error(&host_port, e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| map_io_error(&host_port, e))?;
        Ok(stream)
    }
}

fn map_io_error(target: &str, err: io::Error) -> ConnectError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ConnectError::Refused {
            target: target.to_string(),
        },
        _ => ConnectError::Io {
            target: target.to_string(),
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connects_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let target = DialTarget::parse(&format!("tcp://{}", addr)).unwrap();

        let connector = TcpConnector::with_timeout(Duration::from_secs(1));
        let stream = connector.connect(&target).await.unwrap();
        assert_eq!(stream.peer_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn test_refused_without_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let target = DialTarget::parse(&format!("tcp://{}", addr)).unwrap();

        let connector = TcpConnector::with_timeout(Duration::from_secs(1));
        let err = connector.connect(&target).await.unwrap_err();
        assert!(matches!(
            err,
            ConnectError::Refused { .. } | ConnectError::Io { .. }
        ));
    }

    #[test]
    fn test_map_io_error_refused() {
        let err = map_io_error(
            "127.0.0.1:1",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert_eq!(
            err,
            ConnectError::Refused {
                target: "127.0.0.1:1".to_string()
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let config = DialConfig {
            retry_interval_ms: 1000,
            connect_timeout_ms: 0,
        };
        assert!(matches!(
            TcpConnector::new(&config),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(
            TcpConnector::new(&DialConfig::for_testing())
                .unwrap()
                .connect_timeout(),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_default_uses_config_timeout() {
        assert_eq!(
            TcpConnector::default().connect_timeout(),
            DialConfig::default().connect_timeout()
        );
    }
}
