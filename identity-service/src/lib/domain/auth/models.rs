use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::errors::CredentialIdError;

/// Stored identity record.
///
/// Created on registration and only read afterwards. The email is unique
/// across credentials; the repository enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub email: String,
    pub password_hash: String,
}

impl Credential {
    /// Public projection of the credential, without the password hash.
    pub fn to_dto(&self) -> CredentialDto {
        CredentialDto {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a credential ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CredentialIdError> {
        Uuid::parse_str(s)
            .map(CredentialId)
            .map_err(|e| CredentialIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What registration hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialDto {
    pub id: CredentialId,
    pub email: String,
}

/// Registration input as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub confirmed_password: String,
}

impl RegistrationRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirmed_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirmed_password: confirmed_password.into(),
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirmed_password
    }
}

/// Login input as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Audience and lifetime stamped on every issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPolicy {
    pub audience: String,
    pub expiration_minutes: i64,
}

impl TokenPolicy {
    pub const DEFAULT_AUDIENCE: &'static str = "app";
    pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            audience: Self::DEFAULT_AUDIENCE.to_string(),
            expiration_minutes: Self::DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

/// Lookup key used for every credential query.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
