//! Identity registration policy.

use fabric_bootstrap_core::{
    EnrollError, EnrollmentRequest, EnrollmentResult, EnrollmentStatus, IntermediateCaRequest,
    KeyMaterial, RegistrationError,
};

use crate::service::CaService;

/// Register an identity, treating an existing registration as success.
///
/// Makes a single attempt. If the CA reports the identity as already
/// registered the error is swallowed and [`EnrollmentStatus::Existed`] is
/// returned with the caller's secret (if any). Every other error is returned
/// unchanged.
///
/// # Errors
///
/// Returns the collaborator's `RegistrationError` for any failure other than
/// an existing registration.
pub fn register_identity<S>(
    ca: &S,
    request: &EnrollmentRequest,
    registrar: &S::Registrar,
) -> Result<EnrollmentResult, RegistrationError>
where
    S: CaService + ?Sized,
{
    let registration = request.to_registration();

    match ca.register(&registration, registrar) {
        Ok(secret) => match &request.enrollment_secret {
            None => {
                if secret.is_empty() {
                    tracing::warn!(
                        enrollment_id = %request.enrollment_id,
                        "CA generated an empty enrollment secret"
                    );
                } else {
                    tracing::info!(
                        enrollment_id = %request.enrollment_id,
                        "new enrollment secret generated by CA"
                    );
                }
                Ok(EnrollmentResult {
                    enrollment_id: request.enrollment_id.clone(),
                    enrollment_secret: Some(secret),
                    status: EnrollmentStatus::Generated,
                })
            }
            Some(assigned) => Ok(EnrollmentResult {
                enrollment_id: request.enrollment_id.clone(),
                enrollment_secret: Some(assigned.clone()),
                status: EnrollmentStatus::Assigned,
            }),
        },
        Err(err) => {
            tracing::warn!(
                enrollment_id = %request.enrollment_id,
                error = %err,
                "registration failed"
            );
            if err.is_already_registered() {
                Ok(EnrollmentResult {
                    enrollment_id: request.enrollment_id.clone(),
                    enrollment_secret: request.enrollment_secret.clone(),
                    status: EnrollmentStatus::Existed,
                })
            } else {
                Err(err)
            }
        }
    }
}

/// Register an identity allowed to act as an intermediate CA.
///
/// Role `client`, unlimited enrollments and `hf.IntermediateCA=true`.
/// Unlike [`register_identity`], an existing registration is an error.
pub fn register_intermediate_ca<S>(
    ca: &S,
    request: &IntermediateCaRequest,
    registrar: &S::Registrar,
) -> Result<String, RegistrationError>
where
    S: CaService + ?Sized,
{
    ca.register(&request.to_registration(), registrar)
}

/// Enroll a registered identity.
pub fn enroll<S>(
    ca: &S,
    enrollment_id: &str,
    enrollment_secret: &str,
) -> Result<KeyMaterial<S::Key>, EnrollError>
where
    S: CaService + ?Sized,
{
    let material = ca.enroll(enrollment_id, enrollment_secret)?;
    tracing::debug!(enrollment_id, "enrolled");
    Ok(material)
}
