//! User login information.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::constants::DEFAULT_USERNAME;

/// Client certificate presented during the TLS handshake.
///
/// Registered users are identified by certificate rather than password.
/// Loading the material from disk is left to the application.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClientCertificate {
    /// DER-encoded certificate chain, leaf first.
    #[zeroize(skip)]
    pub chain: Vec<Vec<u8>>,
    /// PKCS#8 DER-encoded private key.
    pub key: Vec<u8>,
}

impl ClientCertificate {
    /// Create a certificate from a DER chain and a PKCS#8 DER key.
    pub fn new(chain: Vec<Vec<u8>>, key: Vec<u8>) -> Self {
        Self { chain, key }
    }
}

impl fmt::Debug for ClientCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCertificate")
            .field("chain_len", &self.chain.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Display name, password and optional certificate used to authenticate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    #[zeroize(skip)]
    name: String,
    password: String,
    certificate: Option<ClientCertificate>,
}

impl Credentials {
    /// Create credentials with a name and password and no certificate.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            certificate: None,
        }
    }

    /// Attach a client certificate.
    pub fn with_certificate(mut self, certificate: ClientCertificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server or user password (may be empty).
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Client certificate, if any.
    pub fn certificate(&self) -> Option<&ClientCertificate> {
        self.certificate.as_ref()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, "")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("certificate", &self.certificate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials() {
        let creds = Credentials::default();
        assert_eq!(creds.name(), "Anonymous");
        assert_eq!(creds.password(), "");
        assert!(creds.certificate().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("alice", "hunter2")
            .with_certificate(ClientCertificate::new(vec![vec![1, 2, 3]], vec![9; 32]));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("chain_len: 1"));
    }
}
