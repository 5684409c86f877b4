//! Key material routed from the CA into MSP and TLS directories.
//!
//! Keys are opaque here: the keystore only needs a stable file stem and the
//! bytes to persist. Software keys hand out their PKCS#8 PEM; keys held by a
//! hardware module hand out whatever reference their SDK stores on disk.

use zeroize::Zeroizing;

/// Suffix appended to keystore file names (`{private_hex}_sk`).
pub const KEYSTORE_SUFFIX: &str = "_sk";

/// Errors that can occur while serializing a key for the keystore.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The key could not be encoded.
    #[error("failed to encode private key: {0}")]
    Encoding(String),

    /// The key lives in a module that does not export it.
    #[error("private key is not exportable")]
    NotExportable,

    /// The crypto provider could not create a key.
    #[error("failed to generate private key: {0}")]
    Generation(String),
}

/// What a keystore writer needs from a private key.
pub trait PrivateKeyMaterial {
    /// Lowercase hex naming the key in a keystore directory.
    ///
    /// For software keys this is the private scalar.
    fn private_hex(&self) -> String;

    /// Bytes persisted for this key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if the key cannot be serialized.
    fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>, KeyError>;

    /// File name of this key inside a keystore directory.
    fn keystore_file_name(&self) -> String {
        format!("{}{KEYSTORE_SUFFIX}", self.private_hex())
    }
}

/// A key together with its enrollment certificate and the issuing root.
///
/// Certificates are PEM bytes and are never inspected.
#[derive(Clone)]
pub struct KeyMaterial<K> {
    pub key: K,
    pub certificate: Vec<u8>,
    pub root_certificate: Vec<u8>,
}

impl<K> KeyMaterial<K> {
    pub fn new(
        key: K,
        certificate: impl Into<Vec<u8>>,
        root_certificate: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            key,
            certificate: certificate.into(),
            root_certificate: root_certificate.into(),
        }
    }
}

// Explicitly NO Debug derive: K may carry secrets.
impl<K> std::fmt::Debug for KeyMaterial<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("certificate_len", &self.certificate.len())
            .field("root_certificate_len", &self.root_certificate.len())
            .finish()
    }
}
