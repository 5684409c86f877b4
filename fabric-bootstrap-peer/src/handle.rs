//! Peer connection handles.
//!
//! The transport is chosen from the [`TlsMaterial`] the caller supplies:
//! present material gives a `grpcs://` handle with the server name
//! overridden to the peer's host name, absent material gives `grpc://`.

use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

use crate::tls::TlsMaterial;

/// Host used when a descriptor names none.
pub const DEFAULT_PEER_HOST: &str = "localhost";

/// Errors that can occur while turning a handle into a gRPC channel.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    #[error("invalid peer endpoint {url}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to connect to peer {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Where a peer listens and how to trust it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerDescriptor {
    pub peer_port: u16,
    /// TLS server name of the peer, e.g. `peer0.org1.example.com`.
    pub peer_host_name: String,
    /// Address to dial; defaults to [`DEFAULT_PEER_HOST`].
    pub host: Option<String>,
    pub tls: TlsMaterial,
}

/// A request-scoped handle to a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerHandle {
    url: String,
    host: String,
    port: u16,
    ssl_target_name_override: Option<String>,
    pem: Option<String>,
}

impl PeerHandle {
    pub fn new(descriptor: PeerDescriptor) -> Self {
        let host = descriptor
            .host
            .unwrap_or_else(|| DEFAULT_PEER_HOST.to_string());
        let port = descriptor.peer_port;

        match descriptor.tls {
            TlsMaterial::Present { pem } => Self {
                url: format!("grpcs://{host}:{port}"),
                host,
                port,
                ssl_target_name_override: Some(descriptor.peer_host_name),
                pem: Some(pem),
            },
            TlsMaterial::Absent => Self {
                url: format!("grpc://{host}:{port}"),
                host,
                port,
                ssl_target_name_override: None,
                pem: None,
            },
        }
    }

    /// `grpcs://host:port` or `grpc://host:port`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `"grpcs"` or `"grpc"`.
    pub fn scheme(&self) -> &str {
        self.url.split("://").next().unwrap_or_default()
    }

    pub fn is_tls(&self) -> bool {
        self.pem.is_some()
    }

    /// TLS CA certificate this handle trusts.
    pub fn pem(&self) -> Option<&str> {
        self.pem.as_deref()
    }

    /// Server name checked against the peer's certificate.
    pub fn ssl_target_name_override(&self) -> Option<&str> {
        self.ssl_target_name_override.as_deref()
    }

    /// tonic endpoint for this peer. Does not connect.
    pub fn endpoint(&self) -> Result<Endpoint, PeerError> {
        let endpoint_err = |source: tonic::transport::Error| PeerError::Endpoint {
            url: self.url.clone(),
            source,
        };

        match &self.pem {
            Some(pem) => {
                let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem));
                if let Some(name) = &self.ssl_target_name_override {
                    tls = tls.domain_name(name.clone());
                }
                Endpoint::from_shared(format!("https://{}:{}", self.host, self.port))
                    .and_then(|endpoint| endpoint.tls_config(tls))
                    .map_err(endpoint_err)
            }
            None => Endpoint::from_shared(format!("http://{}:{}", self.host, self.port))
                .map_err(endpoint_err),
        }
    }

    /// Open a gRPC channel to the peer.
    pub async fn connect(&self) -> Result<Channel, PeerError> {
        let endpoint = self.endpoint()?;
        tracing::debug!(url = %self.url, "connecting to peer");
        endpoint.connect().await.map_err(|source| PeerError::Connect {
            url: self.url.clone(),
            source,
        })
    }
}

/// Build a peer handle from a descriptor.
pub fn create_peer_handle(descriptor: PeerDescriptor) -> PeerHandle {
    PeerHandle::new(descriptor)
}

/// Fully qualified peer name, `{name}.{domain}`.
pub fn format_peer_name(name: &str, domain: &str) -> String {
    format!("{name}.{domain}")
}
