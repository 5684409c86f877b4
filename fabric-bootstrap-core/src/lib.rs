//! # Fabric Bootstrap Core
//!
//! Plain value types shared by the CA orchestration and peer factory crates.
//!
//! ## Design Principles
//!
//! Apart from [`config::BootstrapConfig::load`], this crate performs no IO:
//! - No network calls
//! - No certificate or key parsing
//! - No logging
//!
//! Collaborators are injected via traits:
//! - [`crypto_path::CryptoPath`] - On-disk MSP/TLS directory conventions
//! - [`key::PrivateKeyMaterial`] - Whatever the key store needs from a key
//!
//! ## Modules
//!
//! - [`enrollment`] - Registration requests, results and errors
//! - [`key`] - Key material routed into keystores
//! - [`crypto_path`] - Path bundles and the `crypto-config` default layout
//! - [`env`] - Ordered `KEY=VALUE` environment lists
//! - [`config`] - Well-known container paths with overridable defaults

pub mod config;
pub mod crypto_path;
pub mod enrollment;
pub mod env;
pub mod key;

// Re-export commonly used types at crate root for convenience.

pub use config::{BootstrapConfig, CaServerPaths, ConfigError, PeerContainerConfig};
pub use crypto_path::{
    CryptoConfigLayout, CryptoPath, MspFiles, NodeType, OrgFiles, OrgKind, OrgMspFiles, TlsFiles,
};
pub use enrollment::{
    Attribute, EnrollError, EnrollmentRequest, EnrollmentResult, EnrollmentStatus,
    IntermediateCaRequest, RegistrationError, RegistrationRequest,
};
pub use env::EnvironmentList;
pub use key::{KeyError, KeyMaterial, PrivateKeyMaterial};
