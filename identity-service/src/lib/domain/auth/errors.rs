use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::outcome::ErrorInfo;
use crate::outcome::ErrorKind;

/// Error for CredentialId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Errors raised by the auth service and its collaborators
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Domain-level errors
    #[error("bad password")]
    BadPassword,

    #[error("user already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Infrastructure errors
    #[error("Credential store error: {0}")]
    Repository(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

impl From<AuthError> for ErrorInfo {
    fn from(err: AuthError) -> Self {
        let kind = match &err {
            AuthError::EmailAlreadyExists(_) => ErrorKind::AlreadyExists,
            AuthError::BadPassword => ErrorKind::Unauthorized,
            AuthError::Password(_) | AuthError::Repository(_) | AuthError::Unknown(_) => {
                ErrorKind::Internal
            }
        };
        ErrorInfo::from_cause(kind, err)
    }
}

impl From<JwtError> for ErrorInfo {
    fn from(err: JwtError) -> Self {
        let kind = if err.is_rejection() {
            ErrorKind::Unauthorized
        } else {
            ErrorKind::Internal
        };
        ErrorInfo::from_cause(kind, err)
    }
}

impl From<PasswordError> for ErrorInfo {
    fn from(err: PasswordError) -> Self {
        ErrorInfo::from_cause(ErrorKind::Internal, err)
    }
}

impl From<CredentialIdError> for ErrorInfo {
    fn from(err: CredentialIdError) -> Self {
        ErrorInfo::from_cause(ErrorKind::Invalid, err)
    }
}
