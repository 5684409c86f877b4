//! Key generation for enrollment.
//!
//! [`CryptoSuite`] is the seam; [`SoftwareCryptoSuite`] produces software
//! ECDSA P-256 keys, the default Fabric key type. A PKCS#11 suite implements
//! the same trait with keys that never leave the module.

use std::path::PathBuf;

use fabric_bootstrap_core::{KeyError, PrivateKeyMaterial};
use p256::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use zeroize::Zeroizing;

use crate::keystore::{KeyStoreWriter, PemKeyStoreWriter};
use crate::materialize::MaterializeError;

/// A software P-256 private key.
///
/// # Security
///
/// - The underlying `SecretKey` zeroizes on drop
/// - No `Debug` implementation to prevent accidental logging
pub struct EcdsaPrivateKey(p256::SecretKey);

impl EcdsaPrivateKey {
    /// Generate a new random private key.
    #[must_use]
    pub fn generate() -> Self {
        Self(p256::SecretKey::random(&mut rand::rngs::OsRng))
    }

    /// Load a private key from PKCS#8 PEM.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encoding` if the PEM is not a P-256 PKCS#8 key.
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, KeyError> {
        p256::SecretKey::from_pkcs8_pem(pem)
            .map(Self)
            .map_err(|e| KeyError::Encoding(e.to_string()))
    }

    /// SEC1 uncompressed public point.
    #[must_use]
    pub fn public_key_bytes(&self) -> Vec<u8> {
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        self.0.public_key().to_encoded_point(false).as_bytes().to_vec()
    }
}

impl PrivateKeyMaterial for EcdsaPrivateKey {
    fn private_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }

    fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        let pem = self
            .0
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| KeyError::Encoding(e.to_string()))?;
        Ok(Zeroizing::new(pem.as_bytes().to_vec()))
    }
}

/// Source of private keys for enrollment.
pub trait CryptoSuite: Send + Sync {
    /// Key type this suite hands out.
    type Key: PrivateKeyMaterial;

    /// Generate a new key.
    ///
    /// # Errors
    ///
    /// Returns `MaterializeError` if the key cannot be created or persisted.
    fn generate_key(&self) -> Result<Self::Key, MaterializeError>;

    /// Whether generated keys live only in memory.
    fn is_ephemeral(&self) -> bool;
}

/// Generates software keys for enrollment.
///
/// Without a key store, generated keys are ephemeral and live only in
/// memory until written by a [`crate::Materializer`]. With a key store, each
/// key is also persisted there as `{private_hex}_sk` on generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftwareCryptoSuite {
    key_store: Option<PathBuf>,
}

impl SoftwareCryptoSuite {
    /// Suite producing ephemeral keys.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Suite persisting every generated key under `dir`.
    pub fn with_key_store(dir: impl Into<PathBuf>) -> Self {
        Self {
            key_store: Some(dir.into()),
        }
    }

    pub fn key_store(&self) -> Option<&std::path::Path> {
        self.key_store.as_deref()
    }
}

impl CryptoSuite for SoftwareCryptoSuite {
    type Key = EcdsaPrivateKey;

    /// Generate a key, persisting it when a key store is configured.
    fn generate_key(&self) -> Result<EcdsaPrivateKey, MaterializeError> {
        let key = EcdsaPrivateKey::generate();
        if let Some(dir) = &self.key_store {
            let path = PemKeyStoreWriter.to_keystore(dir, &key)?;
            tracing::debug!(path = %path.display(), "stored generated key");
        }
        Ok(key)
    }

    fn is_ephemeral(&self) -> bool {
        self.key_store.is_none()
    }
}
