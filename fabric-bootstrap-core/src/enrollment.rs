//! Registration and enrollment records exchanged with a Certificate Authority.

use serde::{Deserialize, Serialize};

/// Text a Fabric CA puts in its error message when an identity exists.
///
/// Only consulted when the collaborator could not classify the error itself.
/// See [`RegistrationError::is_already_registered`].
pub const ALREADY_REGISTERED_MARKER: &str = "is already registered";

/// Attribute name that allows an identity to act as an intermediate CA.
pub const INTERMEDIATE_CA_ATTRIBUTE: &str = "hf.IntermediateCA";

/// An identity to register with the CA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub enrollment_id: String,
    /// Secret to assign. When `None` the CA generates one.
    pub enrollment_secret: Option<String>,
    pub affiliation: String,
    pub role: String,
}

impl EnrollmentRequest {
    pub fn new(
        enrollment_id: impl Into<String>,
        affiliation: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            enrollment_id: enrollment_id.into(),
            enrollment_secret: None,
            affiliation: affiliation.into(),
            role: role.into(),
        }
    }

    /// Assign an explicit enrollment secret instead of letting the CA pick one.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.enrollment_secret = Some(secret.into());
        self
    }

    /// Build the request submitted to the CA.
    ///
    /// The affiliation is lowercased; the CA stores affiliations case-folded.
    pub fn to_registration(&self) -> RegistrationRequest {
        RegistrationRequest {
            enrollment_id: self.enrollment_id.clone(),
            enrollment_secret: self.enrollment_secret.clone(),
            affiliation: self.affiliation.to_lowercase(),
            role: self.role.clone(),
            max_enrollments: None,
            attrs: Vec::new(),
        }
    }
}

/// An identity to register as an intermediate CA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateCaRequest {
    pub enrollment_id: String,
    pub affiliation: String,
}

impl IntermediateCaRequest {
    pub fn new(enrollment_id: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            enrollment_id: enrollment_id.into(),
            affiliation: affiliation.into(),
        }
    }

    /// Client role, unlimited enrollments, `hf.IntermediateCA=true`.
    pub fn to_registration(&self) -> RegistrationRequest {
        RegistrationRequest {
            enrollment_id: self.enrollment_id.clone(),
            enrollment_secret: None,
            affiliation: self.affiliation.to_lowercase(),
            role: "client".to_string(),
            max_enrollments: Some(-1),
            attrs: vec![Attribute::new(INTERMEDIATE_CA_ATTRIBUTE, "true")],
        }
    }
}

/// Name/value attribute attached to a registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Registration request as handed to the CA collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(rename = "enrollmentID")]
    pub enrollment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_secret: Option<String>,
    pub affiliation: String,
    pub role: String,
    /// `None` leaves the CA default in place; `-1` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_enrollments: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attrs: Vec<Attribute>,
}

/// How the enrollment secret of a registration was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// No secret was supplied; the CA generated one.
    Generated,
    /// The caller supplied the secret.
    Assigned,
    /// The identity was already registered with the CA.
    Existed,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentResult {
    pub enrollment_id: String,
    /// `None` only for [`EnrollmentStatus::Existed`] when no secret was supplied.
    pub enrollment_secret: Option<String>,
    pub status: EnrollmentStatus,
}

/// Errors reported by the CA when registering an identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The identity already exists on the CA.
    #[error("identity '{enrollment_id}' is already registered")]
    AlreadyRegistered { enrollment_id: String },

    /// The CA answered with an error response.
    #[error("registration rejected by CA: {message}")]
    Rejected { code: Option<i64>, message: String },

    /// The CA could not be reached or answered garbage.
    #[error("CA transport error: {0}")]
    Transport(String),
}

impl RegistrationError {
    /// Whether this error means the identity is already registered.
    ///
    /// The structured variant is authoritative. Collaborators that only pass
    /// through the CA's message are matched on [`ALREADY_REGISTERED_MARKER`].
    pub fn is_already_registered(&self) -> bool {
        matches!(self, Self::AlreadyRegistered { .. })
            || self.to_string().contains(ALREADY_REGISTERED_MARKER)
    }
}

/// Errors reported by the CA when enrolling an identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EnrollError {
    /// The CA refused the enrollment (bad secret, enrollment limit reached).
    #[error("enrollment rejected by CA: {message}")]
    Rejected { code: Option<i64>, message: String },

    #[error("CA transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_lowercases_affiliation() {
        let request = EnrollmentRequest::new("peer0", "Org1.Department1", "peer");
        let registration = request.to_registration();
        assert_eq!(registration.affiliation, "org1.department1");
        assert_eq!(registration.role, "peer");
        assert_eq!(registration.max_enrollments, None);
        assert!(registration.attrs.is_empty());
    }

    #[test]
    fn test_intermediate_registration_forces_client_role() {
        let request = IntermediateCaRequest::new("ica.org1", "ORG1");
        let registration = request.to_registration();
        assert_eq!(registration.role, "client");
        assert_eq!(registration.max_enrollments, Some(-1));
        assert_eq!(registration.affiliation, "org1");
        assert_eq!(
            registration.attrs,
            vec![Attribute::new("hf.IntermediateCA", "true")]
        );
    }

    #[test]
    fn test_registration_request_wire_names() {
        let request = EnrollmentRequest::new("user1", "org1", "client").with_secret("pw");
        let json = serde_json::to_value(request.to_registration()).unwrap();
        assert_eq!(json["enrollmentID"], "user1");
        assert_eq!(json["enrollmentSecret"], "pw");
        assert!(json.get("maxEnrollments").is_none());
        assert!(json.get("attrs").is_none());
    }

    #[test]
    fn test_enrollment_status_snake_case() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Generated).unwrap(),
            r#""generated""#
        );
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Existed).unwrap(),
            r#""existed""#
        );
    }

    #[test]
    fn test_already_registered_variant() {
        let err = RegistrationError::AlreadyRegistered {
            enrollment_id: "admin".into(),
        };
        assert!(err.is_already_registered());
    }

    #[test]
    fn test_already_registered_from_message_text() {
        let err = RegistrationError::Rejected {
            code: Some(0),
            message: "Identity 'peer0' is already registered".into(),
        };
        assert!(err.is_already_registered());
    }

    #[test]
    fn test_other_rejections_are_not_already_registered() {
        let err = RegistrationError::Rejected {
            code: Some(0),
            message: "The CN 'x' exceeds the maximum character limit of 64".into(),
        };
        assert!(!err.is_already_registered());
        assert!(!RegistrationError::Transport("connection refused".into()).is_already_registered());
    }
}
