//! In-memory CA used by the integration tests.
//!
//! Mirrors the behaviour of a Fabric CA closely enough for the bootstrap
//! flow: registration generates secrets, duplicate identities are rejected
//! with the CA's own wording, and enrollment checks the secret.

use std::collections::HashMap;
use std::sync::Mutex;

use fabric_bootstrap_ca::{CaService, EcdsaPrivateKey};
use fabric_bootstrap_core::{EnrollError, KeyMaterial, RegistrationError, RegistrationRequest};

pub const ROOT_PEM: &[u8] = b"-----BEGIN CERTIFICATE-----\nROOT\n-----END CERTIFICATE-----\n";

/// Registrar identity; only the admin may register.
pub struct Registrar(pub &'static str);

pub struct InMemoryCa {
    identities: Mutex<HashMap<String, RegistrationRequest>>,
    /// When set, duplicates are reported with the CA's raw message instead of
    /// the structured variant.
    raw_messages: bool,
    counter: Mutex<u32>,
}

impl InMemoryCa {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(HashMap::new()),
            raw_messages: false,
            counter: Mutex::new(0),
        }
    }

    /// CA whose errors only carry the server's message text.
    pub fn with_raw_messages() -> Self {
        Self {
            raw_messages: true,
            ..Self::new()
        }
    }

    pub fn registered(&self, enrollment_id: &str) -> Option<RegistrationRequest> {
        self.identities.lock().unwrap().get(enrollment_id).cloned()
    }

    fn next_secret(&self) -> String {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("generated-{}", *counter)
    }
}

impl CaService for InMemoryCa {
    type Registrar = Registrar;
    type Key = EcdsaPrivateKey;

    fn register(
        &self,
        request: &RegistrationRequest,
        registrar: &Registrar,
    ) -> Result<String, RegistrationError> {
        if registrar.0 != "admin" {
            return Err(RegistrationError::Rejected {
                code: Some(71),
                message: format!("Authorization failure: '{}' is not a registrar", registrar.0),
            });
        }

        let mut identities = self.identities.lock().unwrap();
        if identities.contains_key(&request.enrollment_id) {
            return Err(if self.raw_messages {
                RegistrationError::Rejected {
                    code: Some(0),
                    message: format!("Identity '{}' is already registered", request.enrollment_id),
                }
            } else {
                RegistrationError::AlreadyRegistered {
                    enrollment_id: request.enrollment_id.clone(),
                }
            });
        }

        let secret = match &request.enrollment_secret {
            Some(secret) => secret.clone(),
            None => self.next_secret(),
        };
        let mut stored = request.clone();
        stored.enrollment_secret = Some(secret.clone());
        identities.insert(request.enrollment_id.clone(), stored);
        Ok(secret)
    }

    fn enroll(
        &self,
        enrollment_id: &str,
        enrollment_secret: &str,
    ) -> Result<KeyMaterial<EcdsaPrivateKey>, EnrollError> {
        let identities = self.identities.lock().unwrap();
        let identity = identities
            .get(enrollment_id)
            .filter(|identity| identity.enrollment_secret.as_deref() == Some(enrollment_secret))
            .ok_or_else(|| EnrollError::Rejected {
                code: Some(20),
                message: "Authentication failure".to_string(),
            })?;

        let certificate = format!(
            "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
            identity.enrollment_id
        );
        Ok(KeyMaterial::new(
            EcdsaPrivateKey::generate(),
            certificate.into_bytes(),
            ROOT_PEM.to_vec(),
        ))
    }
}
