//! Channel establishment
//!
//! Plaintext channels go straight through tonic's own connector. TLS
//! channels are assembled over a rustls client configuration instead, so
//! peer verification can be relaxed for control planes running on
//! self-signed certificates.

use std::sync::Arc;

use hyper_util::rt::TokioIo;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tonic::transport::{Channel, Uri};
use tower::service_fn;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::options::ConnectOptions;

/// Open a channel according to the connection options.
///
/// Failure here is terminal for the caller; there is no retry.
///
/// # Errors
/// - `ClientError::InvalidEndpoint` if the server address is empty or does
///   not form a valid URI
/// - `ClientError::Connection` if the endpoint cannot be reached
pub async fn open_channel(options: &ConnectOptions) -> Result<Channel> {
    if options.server.is_empty() {
        return Err(ClientError::InvalidEndpoint(
            "server address is empty".to_string(),
        ));
    }

    if options.plaintext {
        open_plaintext(&options.server).await
    } else {
        open_tls(&options.server, options.insecure_skip_verify).await
    }
}

async fn open_plaintext(server: &str) -> Result<Channel> {
    let uri = endpoint_uri(server, true);

    debug!(%uri, "opening plaintext channel");
    Channel::from_shared(uri.clone())
        .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", uri, e)))?
        .connect()
        .await
        .map_err(|e| ClientError::Connection(format!("failed to connect to {}: {}", server, e)))
}

async fn open_tls(server: &str, skip_verify: bool) -> Result<Channel> {
    let uri = endpoint_uri(server, false);
    let endpoint = Channel::from_shared(uri.clone())
        .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", uri, e)))?;

    let connector = TlsConnector::from(Arc::new(tls_config(skip_verify)));
    let sni = server_name(server)?;
    let addr = server.to_string();

    debug!(server = %addr, skip_verify, "opening TLS channel");
    endpoint
        .connect_with_connector(service_fn(move |_: Uri| {
            let connector = connector.clone();
            let sni = sni.clone();
            let addr = addr.clone();
            async move {
                let tcp = TcpStream::connect(addr.as_str()).await?;
                let tls = connector.connect(sni, tcp).await?;
                Ok::<_, std::io::Error>(TokioIo::new(tls))
            }
        }))
        .await
        .map_err(|e| ClientError::Connection(format!("failed to connect to {}: {}", server, e)))
}

/// Scheme selection: `plaintext` dials `http://`, everything else `https://`.
fn endpoint_uri(server: &str, plaintext: bool) -> String {
    if plaintext {
        format!("http://{}", server)
    } else {
        format!("https://{}", server)
    }
}

/// Extract the name presented for SNI from a `host:port` address.
fn server_name(server: &str) -> Result<ServerName<'static>> {
    let host = server
        .rsplit_once(':')
        .map(|(host, _)| host)
        .unwrap_or(server)
        .trim_start_matches('[')
        .trim_end_matches(']');

    ServerName::try_from(host.to_string())
        .map_err(|e| ClientError::Tls(format!("invalid server name '{}': {}", host, e)))
}

/// rustls configuration for the channel: webpki roots, or no peer
/// verification when `skip_verify` is set.
fn tls_config(skip_verify: bool) -> ClientConfig {
    let mut config = if skip_verify {
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(danger::NoVerification::new()))
            .with_no_client_auth()
    } else {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    };

    // gRPC runs over HTTP/2; advertise it during the handshake.
    config.alpn_protocols = vec![b"h2".to_vec()];
    config
}

mod danger {
    //! Peer verification bypass for self-signed control planes.

    use rustls::client::danger::{
        HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
    };
    use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
    use rustls::{DigitallySignedStruct, SignatureScheme};
    use rustls_pki_types::{CertificateDer, ServerName, UnixTime};

    /// Accepts any server certificate. Handshake signatures are still
    /// checked, so the session keys stay bound to the presented chain.
    #[derive(Debug)]
    pub struct NoVerification(CryptoProvider);

    impl NoVerification {
        pub fn new() -> Self {
            Self(rustls::crypto::ring::default_provider())
        }
    }

    impl Default for NoVerification {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ServerCertVerifier for NoVerification {
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
            verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
        }

        fn verify_tls13_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, rustls::Error> {
            verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.0.signature_verification_algorithms.supported_schemes()
        }
    }
}
