//! TCP endpoint addressing.

use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// A TCP server address: host plus port.
///
/// Immutable once created. Sessions receive an endpoint at construction
/// and keep it for their whole lifetime; reconnecting always targets the
/// same endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint from trusted parts (compiled-in defaults).
    ///
    /// Untrusted input (CLI arguments, config files) goes through
    /// [`Endpoint::checked`] or [`FromStr`] instead.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Creates an endpoint, rejecting empty hosts and port 0.
    pub fn checked(host: impl Into<String>, port: u16) -> DomainResult<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(DomainError::InvalidEndpoint {
                value: format!(":{port}"),
                reason: "host must not be empty".to_string(),
            });
        }
        if port == 0 {
            return Err(DomainError::InvalidEndpoint {
                value: format!("{host}:{port}"),
                reason: "port must be 1-65535".to_string(),
            });
        }
        Ok(Self { host, port })
    }

    /// Creates a loopback endpoint on the given port.
    pub fn localhost(port: u16) -> Self {
        Self::new("127.0.0.1", port)
    }

    /// Returns the host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the `host:port` form accepted by tokio's connect/bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = DomainError;

    /// Parses `host:port`. The port is taken from the last colon, so
    /// colon-bearing hosts still split correctly.
    fn from_str(s: &str) -> DomainResult<Self> {
        let (host, port_str) = s.rsplit_once(':').ok_or_else(|| DomainError::InvalidEndpoint {
            value: s.to_string(),
            reason: "expected host:port".to_string(),
        })?;

        let port: u16 = port_str.parse().map_err(|_| DomainError::InvalidEndpoint {
            value: s.to_string(),
            reason: format!("'{port_str}' is not a valid port"),
        })?;

        Self::checked(host, port)
    }
}
