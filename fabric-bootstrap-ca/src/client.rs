//! CA client handles and their diagnostics.

use fabric_bootstrap_core::env::GODEBUG_NETDNS;
use fabric_bootstrap_core::EnvironmentList;
use serde::Serialize;

use crate::crypto_suite::{CryptoSuite, SoftwareCryptoSuite};
use crate::materialize::MaterializeError;

/// Port a Fabric CA listens on when the URL names none.
pub const DEFAULT_CA_PORT: u16 = 7054;

/// Errors that can occur while building a CA client handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CaClientError {
    #[error("invalid CA url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported CA url scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// TLS settings for talking to the CA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsOptions {
    /// PEM-encoded trust roots.
    pub trusted_roots: Vec<Vec<u8>>,
    /// Whether the CA's certificate is verified.
    pub verify: bool,
}

impl TlsOptions {
    /// Verification is enabled iff at least one trust root is supplied.
    pub fn from_trusted_roots(trusted_roots: Vec<Vec<u8>>) -> Self {
        let verify = !trusted_roots.is_empty();
        Self {
            trusted_roots,
            verify,
        }
    }
}

/// Connection parameters for a Fabric CA.
///
/// The handle is plain data; a [`crate::CaService`] implementation reads it
/// to set up its transport. Keys come from the [`CryptoSuite`] the handle was
/// built with, so software and hardware-backed suites are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaClient<S = SoftwareCryptoSuite> {
    /// CA name within a multi-CA server; `None` selects the default CA.
    pub ca_name: Option<String>,
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
    pub tls_options: TlsOptions,
    pub crypto_suite: S,
}

impl<S: CryptoSuite> CaClient<S> {
    /// Build a handle for the CA at `url`.
    ///
    /// An empty `trusted_roots` list disables TLS verification.
    ///
    /// # Errors
    ///
    /// Returns `CaClientError` if `url` is not an `http(s)://host[:port]` URL.
    pub fn new(
        url: &str,
        trusted_roots: Vec<Vec<u8>>,
        crypto_suite: S,
    ) -> Result<Self, CaClientError> {
        let uri: http::Uri = url.parse().map_err(|e: http::uri::InvalidUri| {
            CaClientError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let protocol = match uri.scheme_str() {
            Some(scheme @ ("http" | "https")) => scheme.to_string(),
            Some(other) => return Err(CaClientError::UnsupportedScheme(other.to_string())),
            None => {
                return Err(CaClientError::InvalidUrl {
                    url: url.to_string(),
                    reason: "missing scheme".to_string(),
                })
            }
        };

        let hostname = uri
            .host()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| CaClientError::InvalidUrl {
                url: url.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();

        let tls_options = TlsOptions::from_trusted_roots(trusted_roots);
        if !tls_options.verify {
            tracing::warn!(url, "no trusted roots supplied, CA TLS verification disabled");
        }

        Ok(Self {
            ca_name: None,
            protocol,
            hostname,
            port: uri.port_u16().unwrap_or(DEFAULT_CA_PORT),
            tls_options,
            crypto_suite,
        })
    }

    /// Select a named CA on a multi-CA server.
    pub fn with_ca_name(mut self, ca_name: impl Into<String>) -> Self {
        self.ca_name = Some(ca_name.into());
        self
    }

    /// Generate an enrollment key with this handle's crypto suite.
    pub fn generate_key(&self) -> Result<S::Key, MaterializeError> {
        self.crypto_suite.generate_key()
    }

    /// Normalized base URL, `{protocol}://{hostname}:{port}`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.hostname, self.port)
    }

    /// Diagnostic summary of this handle.
    pub fn describe(&self) -> CaClientSummary {
        CaClientSummary {
            ca_name: self.ca_name.clone(),
            hostname: self.hostname.clone(),
            port: self.port,
            tls_options: TlsOptionsSummary {
                trusted_roots: self
                    .tls_options
                    .trusted_roots
                    .iter()
                    .map(|root| String::from_utf8_lossy(root).into_owned())
                    .collect(),
                verify: self.tls_options.verify,
            },
        }
    }
}

/// Human-readable view of a [`CaClient`]. Displays as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaClientSummary {
    pub ca_name: Option<String>,
    pub hostname: String,
    pub port: u16,
    pub tls_options: TlsOptionsSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsOptionsSummary {
    /// Trust roots decoded as text.
    pub trusted_roots: Vec<String>,
    pub verify: bool,
}

impl std::fmt::Display for CaClientSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// Environment for a CA server process.
pub fn ca_environment() -> EnvironmentList {
    EnvironmentList::from(vec![GODEBUG_NETDNS.to_string()])
}
