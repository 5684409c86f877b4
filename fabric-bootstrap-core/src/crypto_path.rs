//! On-disk MSP and TLS directory conventions.
//!
//! [`CryptoPath`] is the seam between the materialization code and whatever
//! directory convention a deployment uses. [`CryptoConfigLayout`] implements
//! the layout produced by Fabric's `cryptogen`:
//!
//! ```text
//! {root}/peerOrganizations/{domain}/
//! ├── ca/ca.{domain}-cert.pem
//! ├── msp/{admincerts,cacerts,tlscacerts}/
//! ├── tlsca/tlsca.{domain}-cert.pem
//! ├── peers/{node}.{domain}/{msp,tls}/
//! └── users/{user}@{domain}/{msp,tls}/
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of network node a set of paths is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Peer,
    Orderer,
    /// A user identity, e.g. the organization admin.
    User,
}

/// Kind of organization: owns peers or orderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgKind {
    Peer,
    Orderer,
}

impl OrgKind {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Peer => "peerOrganizations",
            Self::Orderer => "ordererOrganizations",
        }
    }
}

/// Node-level MSP paths. `keystore` is a directory, the rest are files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspFiles {
    pub admincerts: PathBuf,
    pub cacerts: PathBuf,
    pub keystore: PathBuf,
    pub signcerts: PathBuf,
    pub tlscacerts: PathBuf,
}

/// Organization-level MSP paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMspFiles {
    pub admincerts: PathBuf,
    pub cacerts: PathBuf,
    pub tlscacerts: PathBuf,
}

/// Organization-level paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgFiles {
    /// Legacy location of the organization root certificate.
    pub ca: PathBuf,
    pub msp: OrgMspFiles,
    pub tlsca: PathBuf,
}

/// Node-level TLS paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub ca_cert: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Resolves MSP and TLS paths for a node type.
///
/// Implementations only compute paths; they never touch the filesystem.
pub trait CryptoPath: Send + Sync {
    fn msp_files(&self, node_type: NodeType) -> MspFiles;
    fn org_files(&self, node_type: NodeType) -> OrgFiles;
    fn tls_files(&self, node_type: NodeType) -> TlsFiles;
}

/// `cryptogen`-compatible layout for one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfigLayout {
    root: PathBuf,
    org_kind: OrgKind,
    domain: String,
    node_name: String,
    user_name: String,
}

impl CryptoConfigLayout {
    /// Layout for a peer organization, e.g. `org1.example.com`.
    pub fn peer_org(root: impl AsRef<Path>, domain: impl Into<String>) -> Self {
        Self::new(root, OrgKind::Peer, domain, "peer0")
    }

    /// Layout for an orderer organization, e.g. `example.com`.
    pub fn orderer_org(root: impl AsRef<Path>, domain: impl Into<String>) -> Self {
        Self::new(root, OrgKind::Orderer, domain, "orderer0")
    }

    fn new(
        root: impl AsRef<Path>,
        org_kind: OrgKind,
        domain: impl Into<String>,
        node_name: &str,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            org_kind,
            domain: domain.into(),
            node_name: node_name.to_string(),
            user_name: "Admin".to_string(),
        }
    }

    /// Set the node name (`peer1`, `orderer2`, ...).
    pub fn with_node(mut self, name: impl Into<String>) -> Self {
        self.node_name = name.into();
        self
    }

    /// Set the user name used for [`NodeType::User`] and admin certificates.
    pub fn with_user(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Fully qualified node name, `{node}.{domain}`.
    pub fn node_full_name(&self) -> String {
        format!("{}.{}", self.node_name, self.domain)
    }

    /// Fully qualified user name, `{user}@{domain}`.
    pub fn user_full_name(&self) -> String {
        format!("{}@{}", self.user_name, self.domain)
    }

    fn org_kind_for(&self, node_type: NodeType) -> OrgKind {
        match node_type {
            NodeType::Peer => OrgKind::Peer,
            NodeType::Orderer => OrgKind::Orderer,
            NodeType::User => self.org_kind,
        }
    }

    /// Organization directory for a node type.
    pub fn org_dir(&self, node_type: NodeType) -> PathBuf {
        self.root
            .join(self.org_kind_for(node_type).dir_name())
            .join(&self.domain)
    }

    /// Directory holding `msp/` and `tls/` for a node type.
    pub fn node_dir(&self, node_type: NodeType) -> PathBuf {
        let org_dir = self.org_dir(node_type);
        match node_type {
            NodeType::Peer => org_dir.join("peers").join(self.node_full_name()),
            NodeType::Orderer => org_dir.join("orderers").join(self.node_full_name()),
            NodeType::User => org_dir.join("users").join(self.user_full_name()),
        }
    }

    fn common_name(&self, node_type: NodeType) -> String {
        match node_type {
            NodeType::Peer | NodeType::Orderer => self.node_full_name(),
            NodeType::User => self.user_full_name(),
        }
    }

    fn ca_cert_name(&self) -> String {
        format!("ca.{}-cert.pem", self.domain)
    }

    fn tlsca_cert_name(&self) -> String {
        format!("tlsca.{}-cert.pem", self.domain)
    }

    fn admin_cert_name(&self) -> String {
        format!("{}-cert.pem", self.user_full_name())
    }
}

impl CryptoPath for CryptoConfigLayout {
    fn msp_files(&self, node_type: NodeType) -> MspFiles {
        let msp = self.node_dir(node_type).join("msp");
        MspFiles {
            admincerts: msp.join("admincerts").join(self.admin_cert_name()),
            cacerts: msp.join("cacerts").join(self.ca_cert_name()),
            keystore: msp.join("keystore"),
            signcerts: msp
                .join("signcerts")
                .join(format!("{}-cert.pem", self.common_name(node_type))),
            tlscacerts: msp.join("tlscacerts").join(self.tlsca_cert_name()),
        }
    }

    fn org_files(&self, node_type: NodeType) -> OrgFiles {
        let org_dir = self.org_dir(node_type);
        let msp = org_dir.join("msp");
        OrgFiles {
            ca: org_dir.join("ca").join(self.ca_cert_name()),
            msp: OrgMspFiles {
                admincerts: msp.join("admincerts").join(self.admin_cert_name()),
                cacerts: msp.join("cacerts").join(self.ca_cert_name()),
                tlscacerts: msp.join("tlscacerts").join(self.tlsca_cert_name()),
            },
            tlsca: org_dir.join("tlsca").join(self.tlsca_cert_name()),
        }
    }

    fn tls_files(&self, node_type: NodeType) -> TlsFiles {
        let tls = self.node_dir(node_type).join("tls");
        let (cert, key) = match node_type {
            NodeType::User => ("client.crt", "client.key"),
            NodeType::Peer | NodeType::Orderer => ("server.crt", "server.key"),
        };
        TlsFiles {
            ca_cert: tls.join("ca.crt"),
            cert: tls.join(cert),
            key: tls.join(key),
        }
    }
}
