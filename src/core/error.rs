//! Error types for the whisper client.

use std::io;

use thiserror::Error;

use crate::proto::RejectType;

/// Errors that end (or prevent) a control session.
///
/// Most variants are session-fatal but process-safe: the engine closes the
/// connection and the outer loop reconnects. See [`ConnectionError::is_recoverable`].
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Socket-level failure during connect, send or receive.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// `open()` was called on a connection that is already established.
    #[error("already connected")]
    AlreadyConnected,

    /// The server refused authentication.
    #[error("connection rejected: {reason}")]
    Rejected {
        /// Rejection category reported by the server, if any.
        kind: Option<RejectType>,
        /// Human-readable reason supplied by the server.
        reason: String,
    },

    /// No keepalive reply for longer than the ping timeout.
    #[error("ping timeout")]
    PingTimeout,

    /// The server closed the control stream.
    #[error("connection closed by server")]
    ClosedByPeer,

    /// An operation needed a live connection but there was none.
    #[error("not connected")]
    NotConnected,

    /// A frame header declared a payload larger than we accept.
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge {
        /// Declared payload length.
        len: usize,
        /// Largest payload accepted.
        max: usize,
    },

    /// TCP or TLS establishment did not finish in time.
    #[error("connect timed out")]
    ConnectTimeout,

    /// The configured host is not a valid TLS server name.
    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    /// The engine loop panicked. Carries the panic message.
    #[error("engine panicked: {0}")]
    Panicked(String),

    /// TLS client configuration could not be built.
    #[cfg(feature = "tls")]
    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),
}

impl ConnectionError {
    /// Check if the outer loop may retry the session after this error.
    ///
    /// Configuration and usage errors are not retried: reconnecting would
    /// fail the same way.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConnectionError::Transport(_)
            | ConnectionError::Rejected { .. }
            | ConnectionError::PingTimeout
            | ConnectionError::ClosedByPeer
            | ConnectionError::NotConnected
            | ConnectionError::FrameTooLarge { .. }
            | ConnectionError::ConnectTimeout => true,
            ConnectionError::AlreadyConnected
            | ConnectionError::InvalidServerName(_)
            | ConnectionError::Panicked(_) => false,
            #[cfg(feature = "tls")]
            ConnectionError::Tls(_) => false,
        }
    }

    /// Check if this error is an explicit refusal by the server.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ConnectionError::Rejected { .. })
    }
}

/// Errors parsing a `host:port` address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Host part is empty.
    #[error("empty host in address {0:?}")]
    EmptyHost(String),

    /// Port part is not a valid port number.
    #[error("invalid port in address {0:?}")]
    InvalidPort(String),
}

/// Errors loading a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid TOML for [`ClientConfig`](crate::client::ClientConfig).
    #[cfg(feature = "config")]
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Server address is malformed.
    #[error("address error: {0}")]
    Address(#[from] AddressError),
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(ConnectionError::PingTimeout.is_recoverable());
        assert!(ConnectionError::ClosedByPeer.is_recoverable());
        assert!(ConnectionError::ConnectTimeout.is_recoverable());
        assert!(
            ConnectionError::Transport(io::Error::new(io::ErrorKind::BrokenPipe, "test"))
                .is_recoverable()
        );
        assert!(
            ConnectionError::Rejected {
                kind: None,
                reason: "full".into()
            }
            .is_recoverable()
        );

        assert!(!ConnectionError::AlreadyConnected.is_recoverable());
        assert!(!ConnectionError::InvalidServerName("bad host".into()).is_recoverable());
        assert!(!ConnectionError::Panicked("boom".into()).is_recoverable());
    }

    #[test]
    fn test_rejection_display() {
        let err = ConnectionError::Rejected {
            kind: Some(RejectType::WrongUserPw),
            reason: "Wrong password".into(),
        };
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "connection rejected: Wrong password");
        assert!(!ConnectionError::PingTimeout.is_rejection());
    }
}
