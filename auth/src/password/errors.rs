use thiserror::Error;

/// Failures of the hashing primitive itself. A wrong password is not an
/// error here; `PasswordHasher::verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
