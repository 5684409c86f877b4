//! The CA collaborator seam.

use fabric_bootstrap_core::{
    EnrollError, KeyMaterial, PrivateKeyMaterial, RegistrationError, RegistrationRequest,
};

/// Network calls against a Fabric CA, provided by an SDK.
///
/// Implementations own transport, TLS, request signing and timeouts. Each
/// call is a single attempt; retries are the caller's business.
pub trait CaService: Send + Sync {
    /// Identity that signs registration requests (typically the CA admin).
    type Registrar;

    /// Key type returned by enrollment.
    type Key: PrivateKeyMaterial;

    /// Register an identity and return its enrollment secret.
    ///
    /// When the request carries a secret the CA echoes it back.
    ///
    /// # Errors
    ///
    /// Implementations should report an existing identity as
    /// [`RegistrationError::AlreadyRegistered`]. Passing the CA's message
    /// through as [`RegistrationError::Rejected`] also works.
    fn register(
        &self,
        request: &RegistrationRequest,
        registrar: &Self::Registrar,
    ) -> Result<String, RegistrationError>;

    /// Exchange an enrollment secret for a key and signed certificate.
    fn enroll(
        &self,
        enrollment_id: &str,
        enrollment_secret: &str,
    ) -> Result<KeyMaterial<Self::Key>, EnrollError>;
}
