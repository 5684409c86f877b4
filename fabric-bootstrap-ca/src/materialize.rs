//! Writing enrolled key material into MSP and TLS directory trees.
//!
//! Every write creates missing parent directories and overwrites the target.
//! Writes are not atomic: a failure part way through a call leaves the files
//! written so far in place.

use std::path::{Path, PathBuf};

use fabric_bootstrap_core::{CryptoPath, KeyError, KeyMaterial, NodeType, PrivateKeyMaterial};

use crate::keystore::{KeyStoreWriter, PemKeyStoreWriter};

/// Errors that can occur while writing MSP or TLS files.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Write `contents` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), MaterializeError> {
    let write_err = |source: std::io::Error| MaterializeError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, contents).map_err(write_err)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Routes key material to the paths a [`CryptoPath`] resolves.
#[derive(Debug, Clone, Default)]
pub struct Materializer<W = PemKeyStoreWriter> {
    key_store: W,
}

impl Materializer {
    /// Materializer using [`PemKeyStoreWriter`] for private keys.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: KeyStoreWriter> Materializer<W> {
    /// Materializer with a custom key writer (e.g. for HSM-backed keys).
    pub fn with_key_store(key_store: W) -> Self {
        Self { key_store }
    }

    /// Write an admin certificate to the node's MSP `admincerts`.
    pub fn materialize_admin_certificate(
        &self,
        certificate: &[u8],
        crypto_path: &(impl CryptoPath + ?Sized),
        node_type: NodeType,
    ) -> Result<(), MaterializeError> {
        let msp = crypto_path.msp_files(node_type);
        write_file(&msp.admincerts, certificate)
    }

    /// Populate a node MSP: `signcerts`, `keystore/{hex}_sk` and `cacerts`.
    ///
    /// Returns the keystore file written.
    pub fn materialize_msp<K: PrivateKeyMaterial>(
        &self,
        material: &KeyMaterial<K>,
        crypto_path: &(impl CryptoPath + ?Sized),
        node_type: NodeType,
    ) -> Result<PathBuf, MaterializeError> {
        let msp = crypto_path.msp_files(node_type);
        write_file(&msp.signcerts, &material.certificate)?;
        let key_path = self.key_store.to_keystore(&msp.keystore, &material.key)?;
        write_file(&msp.cacerts, &material.root_certificate)?;
        Ok(key_path)
    }

    /// Populate the organization MSP with the root and admin certificates.
    ///
    /// The root is also written to the legacy organization `ca` directory.
    pub fn materialize_org_admin<K>(
        &self,
        material: &KeyMaterial<K>,
        crypto_path: &(impl CryptoPath + ?Sized),
        node_type: NodeType,
    ) -> Result<(), MaterializeError> {
        let org = crypto_path.org_files(node_type);
        write_file(&org.msp.cacerts, &material.root_certificate)?;
        write_file(&org.ca, &material.root_certificate)?;
        write_file(&org.msp.admincerts, &material.certificate)
    }

    /// Write the TLS root to the organization `tlsca` and MSP `tlscacerts`.
    pub fn materialize_org_tls<K>(
        &self,
        material: &KeyMaterial<K>,
        crypto_path: &(impl CryptoPath + ?Sized),
        node_type: NodeType,
    ) -> Result<(), MaterializeError> {
        let org = crypto_path.org_files(node_type);
        write_file(&org.tlsca, &material.root_certificate)?;
        write_file(&org.msp.tlscacerts, &material.root_certificate)
    }

    /// Populate a node TLS directory.
    ///
    /// The TLS root goes to both `tls/ca.crt` and the node MSP `tlscacerts`.
    pub fn materialize_tls<K: PrivateKeyMaterial>(
        &self,
        material: &KeyMaterial<K>,
        crypto_path: &(impl CryptoPath + ?Sized),
        node_type: NodeType,
    ) -> Result<(), MaterializeError> {
        let tls = crypto_path.tls_files(node_type);
        let msp = crypto_path.msp_files(node_type);
        self.key_store.save(&tls.key, &material.key)?;
        write_file(&tls.cert, &material.certificate)?;
        write_file(&tls.ca_cert, &material.root_certificate)?;
        write_file(&msp.tlscacerts, &material.root_certificate)
    }
}
