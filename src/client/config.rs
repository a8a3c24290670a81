//! Client configuration: defaults, builder, TOML file and environment.

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::constants::{
    CONNECT_TIMEOUT, DEFAULT_USERNAME, LOOP_INTERVAL, PING_INTERVAL, PING_TIMEOUT, POLL_TIMEOUT,
    READ_BUFFER_SIZE, RECONNECT_BACKOFF,
};
use crate::core::{Address, ClientCertificate, ConfigError, Credentials};
use crate::transport::ConnectionOptions;

/// Environment variable overriding [`ClientConfig::address`].
pub const ENV_ADDRESS: &str = "WHISPER_ADDRESS";
/// Environment variable overriding [`ClientConfig::username`].
pub const ENV_USERNAME: &str = "WHISPER_USERNAME";
/// Environment variable overriding [`ClientConfig::password`].
pub const ENV_PASSWORD: &str = "WHISPER_PASSWORD";

/// Everything a client needs to run a session.
///
/// Deserializable from TOML; every field is optional:
///
/// ```toml
/// address = "voice.example.org:64738"
/// username = "alice"
/// password = "secret"
/// tokens = ["red", "blue"]
/// accept_invalid_certs = true
/// ping_interval_ms = 10000
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Server address.
    pub address: Address,
    /// Display name.
    pub username: String,
    /// Server or user password.
    pub password: String,
    /// Access tokens.
    pub tokens: Vec<String>,
    /// Client certificate. Never read from config files.
    #[serde(skip)]
    pub certificate: Option<ClientCertificate>,
    /// Skip server certificate verification.
    pub accept_invalid_certs: bool,
    /// Open the datagram socket alongside the control stream.
    pub media_enabled: bool,
    /// Connect as soon as the engine starts. When false, wait for `Start`.
    pub auto_connect: bool,
    /// After a rejection, wait for `Start` instead of reconnecting.
    pub hold_after_reject: bool,
    /// Bytes read per poll.
    pub read_buffer_size: usize,
    /// Keepalive interval.
    pub ping_interval_ms: u64,
    /// Keepalive timeout.
    pub ping_timeout_ms: u64,
    /// Upper bound on one socket poll.
    pub poll_timeout_ms: u64,
    /// Pause between engine iterations.
    pub loop_interval_ms: u64,
    /// Pause before reconnecting.
    pub reconnect_backoff_ms: u64,
    /// TCP + TLS connect timeout.
    pub connect_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: Address::default(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            tokens: Vec::new(),
            certificate: None,
            accept_invalid_certs: false,
            media_enabled: false,
            auto_connect: true,
            hold_after_reject: false,
            read_buffer_size: READ_BUFFER_SIZE,
            ping_interval_ms: PING_INTERVAL.as_millis() as u64,
            ping_timeout_ms: PING_TIMEOUT.as_millis() as u64,
            poll_timeout_ms: POLL_TIMEOUT.as_millis() as u64,
            loop_interval_ms: LOOP_INTERVAL.as_millis() as u64,
            reconnect_backoff_ms: RECONNECT_BACKOFF.as_millis() as u64,
            connect_timeout_ms: CONNECT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("tokens", &self.tokens.len())
            .field("certificate", &self.certificate)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("media_enabled", &self.media_enabled)
            .field("auto_connect", &self.auto_connect)
            .field("hold_after_reject", &self.hold_after_reject)
            .field("ping_interval_ms", &self.ping_interval_ms)
            .field("ping_timeout_ms", &self.ping_timeout_ms)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Parse a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply `WHISPER_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `WHISPER_*` overrides from an arbitrary lookup.
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(address) = lookup(ENV_ADDRESS) {
            self.address = address.parse()?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        Ok(())
    }

    /// Login information.
    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        match &self.certificate {
            Some(cert) => credentials.with_certificate(cert.clone()),
            None => credentials,
        }
    }

    /// Per-session parameters for a [`Connection`](crate::transport::Connection).
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            address: self.address.clone(),
            credentials: self.credentials(),
            tokens: self.tokens.clone(),
            media_enabled: self.media_enabled,
            ping_interval: self.ping_interval(),
            ping_timeout: self.ping_timeout(),
            read_buffer_size: self.read_buffer_size,
        }
    }

    /// Keepalive interval.
    pub fn ping_interval(&self) -> Duration {
        Duration::from_millis(self.ping_interval_ms)
    }

    /// Keepalive timeout.
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    /// Upper bound on one socket poll.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Pause between engine iterations.
    pub fn loop_interval(&self) -> Duration {
        Duration::from_millis(self.loop_interval_ms)
    }

    /// Pause before reconnecting.
    pub fn reconnect_backoff(&self) -> Duration {
        Duration::from_millis(self.reconnect_backoff_ms)
    }

    /// TCP + TLS connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server address.
    pub fn address(mut self, address: Address) -> Self {
        self.config.address = address;
        self
    }

    /// Parse and set the server address.
    pub fn server(mut self, address: &str) -> Result<Self, ConfigError> {
        self.config.address = address.parse()?;
        Ok(self)
    }

    /// Set the display name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Add an access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.tokens.push(token.into());
        self
    }

    /// Present a client certificate.
    pub fn certificate(mut self, certificate: ClientCertificate) -> Self {
        self.config.certificate = Some(certificate);
        self
    }

    /// Skip server certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Open the datagram socket alongside the control stream.
    pub fn media(mut self, enabled: bool) -> Self {
        self.config.media_enabled = enabled;
        self
    }

    /// Connect on start, or wait for `Start`.
    pub fn auto_connect(mut self, enabled: bool) -> Self {
        self.config.auto_connect = enabled;
        self
    }

    /// After a rejection, wait for `Start` instead of reconnecting.
    pub fn hold_after_reject(mut self, hold: bool) -> Self {
        self.config.hold_after_reject = hold;
        self
    }

    /// Set the keepalive interval and timeout.
    pub fn keepalive(mut self, interval: Duration, timeout: Duration) -> Self {
        self.config.ping_interval_ms = interval.as_millis() as u64;
        self.config.ping_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the poll timeout and the pause between engine iterations.
    pub fn loop_timing(mut self, poll_timeout: Duration, loop_interval: Duration) -> Self {
        self.config.poll_timeout_ms = poll_timeout.as_millis() as u64;
        self.config.loop_interval_ms = loop_interval.as_millis() as u64;
        self
    }

    /// Set the pause before reconnecting.
    pub fn reconnect_backoff(mut self, backoff: Duration) -> Self {
        self.config.reconnect_backoff_ms = backoff.as_millis() as u64;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Finish.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AddressError;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.address.to_string(), "localhost:64738");
        assert_eq!(config.username, "Anonymous");
        assert!(config.auto_connect);
        assert!(!config.hold_after_reject);
        assert_eq!(config.ping_interval(), Duration::from_secs(10));
        assert_eq!(config.ping_timeout(), Duration::from_secs(60));
        assert_eq!(config.poll_timeout(), Duration::from_millis(50));
        assert_eq!(config.loop_interval(), Duration::from_millis(100));
        assert_eq!(config.reconnect_backoff(), Duration::from_secs(1));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_builder() {
        let config = ClientBuilder::new()
            .server("voice.example.org:1234")
            .unwrap()
            .username("alice")
            .password("secret")
            .token("red")
            .accept_invalid_certs(true)
            .auto_connect(false)
            .keepalive(Duration::from_secs(5), Duration::from_secs(30))
            .build();

        assert_eq!(config.address.port(), 1234);
        assert_eq!(config.tokens, vec!["red".to_string()]);
        assert!(config.accept_invalid_certs);
        assert!(!config.auto_connect);
        assert_eq!(config.ping_interval_ms, 5_000);

        let creds = config.credentials();
        assert_eq!(creds.name(), "alice");
        assert_eq!(creds.password(), "secret");

        let options = config.connection_options();
        assert_eq!(options.ping_timeout, Duration::from_secs(30));
        assert_eq!(options.tokens, config.tokens);
    }

    #[test]
    fn test_builder_rejects_bad_address() {
        assert!(matches!(
            ClientBuilder::new().server("host:port"),
            Err(ConfigError::Address(AddressError::InvalidPort(_)))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientBuilder::new().password("hunter2").build();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config
            .apply_env_from(|key| match key {
                ENV_ADDRESS => Some("[::1]:5000".into()),
                ENV_USERNAME => Some("bot".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.address.host(), "::1");
        assert_eq!(config.username, "bot");
        assert_eq!(config.password, "");

        let err = config
            .apply_env_from(|key| (key == ENV_ADDRESS).then(|| ":1".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Address(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
            address = "voice.example.org"
            username = "alice"
            tokens = ["a", "b"]
            hold_after_reject = true
            reconnect_backoff_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.address.port(), 64738);
        assert_eq!(config.username, "alice");
        assert_eq!(config.tokens.len(), 2);
        assert!(config.hold_after_reject);
        assert_eq!(config.reconnect_backoff(), Duration::from_millis(2500));
        assert_eq!(config.poll_timeout_ms, 50);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            ClientConfig::from_toml_str("unknown_key = 1"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("address = \":1\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            ClientConfig::from_file("/nonexistent/whisper.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
