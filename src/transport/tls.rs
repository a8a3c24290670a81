//! Stream establishment for the control channel.
//!
//! [`Connector`] is the seam between [`Connection`](super::Connection) and
//! the network: production code uses [`TlsConnector`], tests substitute an
//! in-memory stream.

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::core::{Address, ConnectionResult};

/// Establishes the byte stream a control session runs over.
pub trait Connector: Send + Sync + 'static {
    /// Established stream type.
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Open a stream to `address`.
    fn connect(
        &self,
        address: &Address,
    ) -> impl Future<Output = ConnectionResult<Self::Stream>> + Send;
}

#[cfg(feature = "tls")]
pub use self::rustls_impl::TlsConnector;

#[cfg(feature = "tls")]
mod rustls_impl {
    use std::fmt;
    use std::sync::Arc;
    use std::time::Duration;

    use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
    use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
    use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer, ServerName, UnixTime};
    use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
    use tokio::net::TcpStream;
    use tokio_rustls::client::TlsStream;
    use tracing::debug;

    use super::Connector;
    use crate::core::constants::CONNECT_TIMEOUT;
    use crate::core::{Address, ConnectionError, ConnectionResult, Credentials};

    /// TCP + rustls connector.
    ///
    /// Voice servers commonly run with self-signed certificates, so
    /// verification can be switched off with `accept_invalid_certs`.
    #[derive(Clone)]
    pub struct TlsConnector {
        inner: tokio_rustls::TlsConnector,
        connect_timeout: Duration,
    }

    impl TlsConnector {
        /// Build a connector presenting the credentials' client certificate, if any.
        pub fn new(credentials: &Credentials, accept_invalid_certs: bool) -> ConnectionResult<Self> {
            let provider = Arc::new(rustls::crypto::ring::default_provider());
            let builder = ClientConfig::builder_with_provider(provider.clone())
                .with_safe_default_protocol_versions()?;

            let builder = if accept_invalid_certs {
                builder
                    .dangerous()
                    .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
            } else {
                let mut roots = RootCertStore::empty();
                roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                builder.with_root_certificates(roots)
            };

            let config = match credentials.certificate() {
                Some(cert) => {
                    let chain = cert
                        .chain
                        .iter()
                        .map(|der| CertificateDer::from(der.clone()))
                        .collect();
                    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(cert.key.clone()));
                    builder.with_client_auth_cert(chain, key)?
                }
                None => builder.with_no_client_auth(),
            };

            Ok(Self {
                inner: tokio_rustls::TlsConnector::from(Arc::new(config)),
                connect_timeout: CONNECT_TIMEOUT,
            })
        }

        /// Override the TCP + handshake timeout.
        pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
            self.connect_timeout = timeout;
            self
        }

        async fn establish(&self, address: &Address) -> ConnectionResult<TlsStream<TcpStream>> {
            let name = ServerName::try_from(address.host().to_string())
                .map_err(|_| ConnectionError::InvalidServerName(address.host().to_string()))?;

            let tcp = TcpStream::connect((address.host(), address.port())).await?;
            tcp.set_nodelay(true)?;
            debug!(%address, "tcp connected, starting tls handshake");

            Ok(self.inner.connect(name, tcp).await?)
        }
    }

    impl fmt::Debug for TlsConnector {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("TlsConnector")
                .field("connect_timeout", &self.connect_timeout)
                .finish_non_exhaustive()
        }
    }

    impl Connector for TlsConnector {
        type Stream = TlsStream<TcpStream>;

        async fn connect(&self, address: &Address) -> ConnectionResult<Self::Stream> {
            tokio::time::timeout(self.connect_timeout, self.establish(address))
                .await
                .map_err(|_| ConnectionError::ConnectTimeout)?
        }
    }

    /// Verifier that accepts any server certificate but still checks
    /// handshake signatures.
    #[derive(Debug)]
    struct AcceptAnyServerCert {
        provider: Arc<CryptoProvider>,
    }

    impl ServerCertVerifier for AcceptAnyServerCert {
        fn verify_server_cert(
            &self,
            _end_entity: &CertificateDer<'_>,
            _intermediates: &[CertificateDer<'_>],
            _server_name: &ServerName<'_>,
            _ocsp_response: &[u8],
            _now: UnixTime,
        ) -> Result<ServerCertVerified, rustls::Error> {
            Ok(ServerCertVerified::assertion())
        }

        fn verify_tls12_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, rustls::Error> {
            verify_tls12_signature(
                message,
                cert,
                dss,
                &self.provider.signature_verification_algorithms,
            )
        }

        fn verify_tls13_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, rustls::Error> {
            verify_tls13_signature(
                message,
                cert,
                dss,
                &self.provider.signature_verification_algorithms,
            )
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.provider
                .signature_verification_algorithms
                .supported_schemes()
        }
    }

}
