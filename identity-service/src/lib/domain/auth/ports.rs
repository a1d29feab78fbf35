use auth::Claims;
use auth::JwtError;
use auth::PasswordError;
use serde_json::Map;
use serde_json::Value;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credential;
use crate::domain::auth::models::CredentialDto;
use crate::domain::auth::models::CredentialId;

/// Port for the auth domain service, consumed by [`AuthCommand`].
///
/// [`AuthCommand`]: crate::domain::auth::command::AuthCommand
pub trait AuthServicePort: Send + Sync + 'static {
    /// Look up a credential by email.
    ///
    /// # Returns
    /// The credential ID, or `None` if no credential uses this email
    ///
    /// # Errors
    /// * `Repository` - Credential store lookup failed
    fn user_exists(&self, email: &str) -> Result<Option<CredentialId>, AuthError>;

    /// Hash the password and persist a new credential.
    ///
    /// # Returns
    /// Public projection of the stored credential
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Store rejected a duplicate email
    /// * `Password` - Hashing failed
    /// * `Repository` - Store write failed
    fn register(&self, email: &str, password: &str) -> Result<CredentialDto, AuthError>;

    /// Check an email and password pair.
    ///
    /// # Returns
    /// * `Ok(Some(id))` - Credential exists and the password matches
    /// * `Ok(None)` - No credential for this email
    ///
    /// # Errors
    /// * `BadPassword` - Credential exists but the password does not match
    /// * `Password` - Stored hash could not be checked
    /// * `Repository` - Credential store lookup failed
    fn verify(&self, email: &str, password: &str) -> Result<Option<CredentialId>, AuthError>;
}

/// Persistence operations for credentials.
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve a credential by (normalized) email.
    ///
    /// # Errors
    /// * `Repository` - Store lookup failed
    fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AuthError>;

    /// Persist a new credential, assigning its ID.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A credential already uses this email
    /// * `Repository` - Store write failed
    fn save(&self, email: &str, password_hash: &str) -> Result<Credential, AuthError>;

    fn find_id_by_email(&self, email: &str) -> Result<Option<CredentialId>, AuthError> {
        Ok(self.find_by_email(email)?.map(|credential| credential.id))
    }

    fn find_hash_by_email(&self, email: &str) -> Result<Option<String>, AuthError> {
        Ok(self
            .find_by_email(email)?
            .map(|credential| credential.password_hash))
    }
}

/// Password hashing primitive.
pub trait PasswordService: Send + Sync + 'static {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// `Ok(false)` on mismatch. Implementations must compare in constant time.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Token signing and verification.
pub trait TokenService: Send + Sync + 'static {
    /// Sign a token for `subject`, valid for `expiration_minutes`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    fn sign(
        &self,
        subject: &str,
        audience: &str,
        expiration_minutes: i64,
        custom_claims: Option<Map<String, Value>>,
    ) -> Result<String, JwtError>;

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidAudience` - Token was issued for another audience
    /// * `InvalidToken` - Signature mismatch or malformed token
    fn verify(&self, token: &str) -> Result<Claims, JwtError>;
}
