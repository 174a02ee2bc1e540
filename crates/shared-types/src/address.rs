//! # Node Address
//!
//! Validator endpoints are configured the way the node prints them, e.g.
//! `tcp://127.0.0.1:26658` for the privval listener or
//! `tcp://127.0.0.1:26657` for the RPC listener. Both consumers need a plain
//! `host:port` pair, so the scheme is split off once here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AddressError;

/// Strip a `scheme://` prefix and any trailing slashes.
///
/// ```
/// use shared_types::strip_scheme;
///
/// assert_eq!(strip_scheme("tcp://127.0.0.1:26658"), "127.0.0.1:26658");
/// assert_eq!(strip_scheme("127.0.0.1:26658"), "127.0.0.1:26658");
/// ```
pub fn strip_scheme(raw: &str) -> &str {
    let rest = match raw.split_once("://") {
        Some((_, rest)) => rest,
        None => raw,
    };
    rest.trim_end_matches('/')
}

/// A validator endpoint: optional scheme, host and port.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeAddress {
    scheme: Option<String>,
    host: String,
    port: u16,
}

impl NodeAddress {
    /// Parse `[scheme://]host:port`.
    ///
    /// IPv6 hosts must be bracketed (`[::1]:26657`).
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        let scheme = trimmed
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .filter(|scheme| !scheme.is_empty());
        let host_port = strip_scheme(trimmed);

        if host_port.is_empty() {
            return Err(AddressError::Empty);
        }

        let (host, port) = host_port
            .rsplit_once(':')
            .ok_or_else(|| AddressError::MissingPort(raw.to_string()))?;

        if host.is_empty() {
            return Err(AddressError::MissingHost(raw.to_string()));
        }
        if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
            return Err(AddressError::UnbracketedIpv6(raw.to_string()));
        }

        let port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| AddressError::InvalidPort(raw.to_string()))?;

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }

    /// Scheme the address was configured with, lowercased (`tcp`, `http`, ...).
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Host part, brackets kept for IPv6 literals.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` with the scheme removed, ready for a socket connect.
    pub fn host_port(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}://{}:{}", scheme, self.host, self.port),
            None => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

impl FromStr for NodeAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodeAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NodeAddress> for String {
    fn from(addr: NodeAddress) -> Self {
        addr.to_string()
    }
}
