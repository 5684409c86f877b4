//! CA orchestration for Fabric network bootstrap.
//!
//! Registers and enrolls identities through an injected [`CaService`] and
//! writes the resulting key material into MSP and TLS directory trees.
//!
//! The CA wire protocol is not implemented here. An SDK plugs in by
//! implementing [`CaService`]; directory conventions plug in through
//! [`fabric_bootstrap_core::CryptoPath`].
//!
//! # Example
//!
//! ```ignore
//! use fabric_bootstrap_ca::{register_identity, enroll, Materializer};
//! use fabric_bootstrap_core::{CryptoConfigLayout, EnrollmentRequest, NodeType};
//!
//! let request = EnrollmentRequest::new("peer0", "org1", "peer");
//! let result = register_identity(&ca, &request, &admin)?;
//! let secret = result.enrollment_secret.as_deref().unwrap_or_default();
//! let material = enroll(&ca, &result.enrollment_id, secret)?;
//!
//! let layout = CryptoConfigLayout::peer_org("crypto-config", "org1.example.com");
//! Materializer::new().materialize_msp(&material, &layout, NodeType::Peer)?;
//! ```

pub mod client;
pub mod crypto_suite;
pub mod keystore;
pub mod materialize;
pub mod register;
pub mod service;

pub use client::{ca_environment, CaClient, CaClientError, CaClientSummary, TlsOptions};
pub use crypto_suite::{CryptoSuite, EcdsaPrivateKey, SoftwareCryptoSuite};
pub use keystore::{KeyStoreWriter, PemKeyStoreWriter};
pub use materialize::{MaterializeError, Materializer};
pub use register::{enroll, register_identity, register_intermediate_ca};
pub use service::CaService;
