//! Server address value type.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::constants::{DEFAULT_HOST, DEFAULT_PORT};
use super::error::AddressError;

/// Server address consisting of a host name and a port.
///
/// Parsed from `"host:port"`, `"[v6-literal]:port"` or a bare `"host"`
/// (which uses [`DEFAULT_PORT`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Address {
    host: String,
    port: u16,
}

impl Address {
    /// Create an address from its parts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or IP literal (without brackets).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port number.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // [v6]:port or [v6]
        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| AddressError::EmptyHost(s.to_string()))?;
            if host.is_empty() {
                return Err(AddressError::EmptyHost(s.to_string()));
            }
            let port = match tail.strip_prefix(':') {
                Some(port) => parse_port(s, port)?,
                None if tail.is_empty() => DEFAULT_PORT,
                None => return Err(AddressError::InvalidPort(s.to_string())),
            };
            return Ok(Self::new(host, port));
        }

        let (host, port) = match s.split_once(':') {
            Some((host, port)) => (host, parse_port(s, port)?),
            None => (s, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(AddressError::EmptyHost(s.to_string()));
        }
        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(input: &str, port: &str) -> Result<u16, AddressError> {
    port.parse()
        .map_err(|_| AddressError::InvalidPort(input.to_string()))
}
