use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::normalize_email;
use crate::domain::auth::models::CredentialDto;
use crate::domain::auth::models::CredentialId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialRepository;
use crate::domain::auth::ports::PasswordService;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<CR, PS>
where
    CR: CredentialRepository,
    PS: PasswordService,
{
    repository: Arc<CR>,
    password_service: Arc<PS>,
}

impl<CR, PS> AuthService<CR, PS>
where
    CR: CredentialRepository,
    PS: PasswordService,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `password_service` - Password hashing implementation
    pub fn new(repository: Arc<CR>, password_service: Arc<PS>) -> Self {
        Self {
            repository,
            password_service,
        }
    }
}

impl<CR, PS> AuthServicePort for AuthService<CR, PS>
where
    CR: CredentialRepository,
    PS: PasswordService,
{
    fn user_exists(&self, email: &str) -> Result<Option<CredentialId>, AuthError> {
        let email = normalize_email(email);
        let id = self.repository.find_id_by_email(&email)?;

        tracing::debug!(email = %email, exists = id.is_some(), "Credential lookup");
        Ok(id)
    }

    fn register(&self, email: &str, password: &str) -> Result<CredentialDto, AuthError> {
        let email = normalize_email(email);
        let password_hash = self.password_service.hash(password)?;

        let credential = self.repository.save(&email, &password_hash)?;

        tracing::info!(credential_id = %credential.id, "Credential registered");
        Ok(credential.to_dto())
    }

    fn verify(&self, email: &str, password: &str) -> Result<Option<CredentialId>, AuthError> {
        let Some(credential) = self.repository.find_by_email(&normalize_email(email))? else {
            return Ok(None);
        };

        if self
            .password_service
            .verify(password, &credential.password_hash)?
        {
            Ok(Some(credential.id))
        } else {
            Err(AuthError::BadPassword)
        }
    }
}
