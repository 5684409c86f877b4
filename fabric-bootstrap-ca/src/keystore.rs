//! Persisting private keys into MSP keystores and TLS directories.

use std::path::{Path, PathBuf};

use fabric_bootstrap_core::PrivateKeyMaterial;

use crate::materialize::{write_file, MaterializeError};

/// Writes private keys to disk.
///
/// The writer does not care whether a key is ephemeral software key material
/// or a reference to a key held in a hardware module; it persists whatever
/// [`PrivateKeyMaterial::to_bytes`] returns.
pub trait KeyStoreWriter: Send + Sync {
    /// Write `key` to `path`, creating parent directories and overwriting.
    fn save(&self, path: &Path, key: &dyn PrivateKeyMaterial) -> Result<(), MaterializeError>;

    /// Write `key` into keystore directory `dir` as `{private_hex}_sk`.
    ///
    /// Returns the path written.
    fn to_keystore(
        &self,
        dir: &Path,
        key: &dyn PrivateKeyMaterial,
    ) -> Result<PathBuf, MaterializeError> {
        let path = dir.join(key.keystore_file_name());
        self.save(&path, key)?;
        Ok(path)
    }
}

/// Default writer: key bytes as-is, owner read/write only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PemKeyStoreWriter;

impl KeyStoreWriter for PemKeyStoreWriter {
    fn save(&self, path: &Path, key: &dyn PrivateKeyMaterial) -> Result<(), MaterializeError> {
        let bytes = key.to_bytes()?;
        write_file(path, &bytes)?;

        // Set restrictive permissions on key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(
                |source| MaterializeError::Write {
                    path: path.to_path_buf(),
                    source,
                },
            )?;
        }

        Ok(())
    }
}
