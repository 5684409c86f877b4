//! Well-known paths and runtime settings for CA and peer containers.
//!
//! Defaults match the official Hyperledger Fabric images. Every value can be
//! overridden from a TOML file; omitted keys keep their default:
//!
//! ```toml
//! [ca]
//! home = "/srv/fabric-ca"
//!
//! [peer]
//! docker_sock = "/run/docker.sock"
//! logging_level = "INFO"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default `FABRIC_CA_HOME` inside the CA server image.
pub const DEFAULT_FABRIC_CA_HOME: &str = "/etc/hyperledger/fabric-ca-server";
/// Default MSP root inside peer containers.
pub const DEFAULT_MSP_ROOT: &str = "/etc/hyperledger/crypto-config";
/// Docker socket as mounted into a peer container.
pub const CONTAINER_DOCKER_SOCK: &str = "/host/var/run/docker.sock";
/// Docker socket on the host.
pub const HOST_DOCKER_SOCK: &str = "/run/docker.sock";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level bootstrap configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub ca: CaServerPaths,
    pub peer: PeerContainerConfig,
}

impl BootstrapConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// File locations of a Fabric CA server, all derived from `FABRIC_CA_HOME`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaServerPaths {
    pub home: PathBuf,
}

impl Default for CaServerPaths {
    fn default() -> Self {
        Self::at(DEFAULT_FABRIC_CA_HOME)
    }
}

impl CaServerPaths {
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn config(&self) -> PathBuf {
        self.home.join("fabric-ca-server-config.yaml")
    }

    pub fn ca_key(&self) -> PathBuf {
        self.home.join("ca-key.pem")
    }

    pub fn ca_cert(&self) -> PathBuf {
        self.home.join("ca-cert.pem")
    }

    pub fn tls_cert(&self) -> PathBuf {
        self.home.join("tls-cert.pem")
    }
}

/// Runtime settings for a peer process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerContainerConfig {
    pub msp_root: PathBuf,
    /// Docker socket used for chaincode containers.
    pub docker_sock: PathBuf,
    /// Port advertised in the peer address and gossip endpoint.
    pub peer_port: u16,
    pub logging_level: String,
    pub chaincode_execute_timeout: String,
    pub chaincode_listen_address: String,
}

impl Default for PeerContainerConfig {
    fn default() -> Self {
        Self {
            msp_root: PathBuf::from(DEFAULT_MSP_ROOT),
            docker_sock: PathBuf::from(CONTAINER_DOCKER_SOCK),
            peer_port: 7051,
            logging_level: "DEBUG".to_string(),
            chaincode_execute_timeout: "180s".to_string(),
            chaincode_listen_address: "0.0.0.0:7052".to_string(),
        }
    }
}

impl PeerContainerConfig {
    /// Settings for a peer running directly on the host.
    pub fn host() -> Self {
        Self {
            docker_sock: PathBuf::from(HOST_DOCKER_SOCK),
            ..Self::default()
        }
    }
}
