//! TLS trust material for peer connections.

use std::path::Path;

/// TLS trust root for a peer connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMaterial {
    /// PEM-encoded CA certificate the peer's TLS certificate chains to.
    Present { pem: String },
    /// The peer speaks plaintext gRPC.
    Absent,
}

impl TlsMaterial {
    pub fn present(pem: impl Into<String>) -> Self {
        Self::Present { pem: pem.into() }
    }

    /// Resolve TLS material before building a handle.
    ///
    /// An explicit, non-empty `pem` wins. Otherwise the file at
    /// `tls_ca_certs_path` is read if it exists. Otherwise TLS is absent.
    ///
    /// # Errors
    ///
    /// Returns the IO error if the file exists but cannot be read.
    pub fn resolve(
        pem: Option<String>,
        tls_ca_certs_path: Option<&Path>,
    ) -> std::io::Result<Self> {
        if let Some(pem) = pem.filter(|pem| !pem.is_empty()) {
            return Ok(Self::Present { pem });
        }

        match tls_ca_certs_path {
            Some(path) if path.exists() => {
                let pem = std::fs::read_to_string(path)?;
                tracing::debug!(path = %path.display(), "loaded peer TLS CA certificate");
                Ok(Self::Present { pem })
            }
            _ => Ok(Self::Absent),
        }
    }

    pub fn pem(&self) -> Option<&str> {
        match self {
            Self::Present { pem } => Some(pem),
            Self::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_pem_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ca.crt");
        std::fs::write(&path, "FROM FILE").unwrap();

        let tls = TlsMaterial::resolve(Some("EXPLICIT".into()), Some(&path)).unwrap();
        assert_eq!(tls, TlsMaterial::present("EXPLICIT"));
    }

    #[test]
    fn test_falls_back_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ca.crt");
        std::fs::write(&path, "FROM FILE").unwrap();

        let tls = TlsMaterial::resolve(None, Some(&path)).unwrap();
        assert_eq!(tls.pem(), Some("FROM FILE"));

        // an empty pem counts as not supplied
        let tls = TlsMaterial::resolve(Some(String::new()), Some(&path)).unwrap();
        assert_eq!(tls.pem(), Some("FROM FILE"));
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let tls = TlsMaterial::resolve(None, Some(&dir.path().join("nope.crt"))).unwrap();
        assert_eq!(tls, TlsMaterial::Absent);
        assert!(!TlsMaterial::resolve(None, None).unwrap().is_present());
    }
}
