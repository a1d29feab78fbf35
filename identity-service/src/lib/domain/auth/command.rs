use std::sync::Arc;

use crate::domain::auth::models::CredentialDto;
use crate::domain::auth::models::CredentialId;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::models::RegistrationRequest;
use crate::domain::auth::models::TokenPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenService;
use crate::outcome::ErrorInfo;
use crate::outcome::ErrorKind;
use crate::outcome::Outcome;
use crate::outcome::ToOutcome;

/// User-facing auth operations.
///
/// Each operation is a linear chain of steps over [`Outcome`]. The first
/// failing step ends the chain and its error is returned as-is, so callers
/// can branch on [`ErrorInfo::kind`] or inspect the original cause.
pub struct AuthCommand<AS, TS>
where
    AS: AuthServicePort,
    TS: TokenService,
{
    auth_service: Arc<AS>,
    token_service: Arc<TS>,
    policy: TokenPolicy,
}

impl<AS, TS> AuthCommand<AS, TS>
where
    AS: AuthServicePort,
    TS: TokenService,
{
    /// Create a command issuing tokens under the default [`TokenPolicy`].
    pub fn new(auth_service: Arc<AS>, token_service: Arc<TS>) -> Self {
        Self {
            auth_service,
            token_service,
            policy: TokenPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a new credential.
    ///
    /// # Errors
    /// * `Invalid` - Password and confirmation differ
    /// * `AlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or the store failed; the store's error is the cause
    pub fn register(&self, request: RegistrationRequest) -> Result<CredentialDto, ErrorInfo> {
        Outcome::success(request)
            .flat_map(|request| {
                request
                    .passwords_match()
                    .to_outcome(ErrorInfo::invalid("passwords do not match"))
                    .map(|()| request)
            })
            .flat_map(|request| {
                Outcome::run_catching(|| self.auth_service.user_exists(&request.email))
                    .flat_map(|existing| {
                        existing
                            .is_none()
                            .to_outcome(ErrorInfo::already_exists("user already exists"))
                    })
                    .map(|()| request)
            })
            .flat_map(|request| {
                Outcome::run_catching(|| {
                    self.auth_service
                        .register(&request.email, &request.password)
                })
            })
            .on_success(|credential| {
                tracing::info!(credential_id = %credential.id, "User registered");
            })
            .on_failure(|error| {
                tracing::warn!(kind = %error.kind(), error = %error, "Registration failed");
            })
            .get_or_throw()
    }

    /// Check credentials and issue a signed token.
    ///
    /// # Errors
    /// * `NotFound` - No credential for this email ("user not found")
    /// * `Unauthorized` - Wrong password ("bad password")
    /// * `Internal` - Store, hashing or token signing failed
    pub fn login(&self, request: LoginRequest) -> Result<String, ErrorInfo> {
        Outcome::success(request)
            .flat_map(|request| {
                Outcome::run_catching(|| {
                    self.auth_service
                        .verify(&request.email, &request.password)
                })
            })
            .flat_map(|verified| verified.to_outcome(ErrorInfo::not_found("user not found")))
            .flat_map(|id| {
                Outcome::run_catching(|| {
                    self.token_service.sign(
                        &id.to_string(),
                        &self.policy.audience,
                        self.policy.expiration_minutes,
                        None,
                    )
                })
                .on_success(|_| tracing::info!(credential_id = %id, "Token issued"))
            })
            .on_failure(|error| {
                tracing::warn!(kind = %error.kind(), error = %error, "Login failed");
            })
            .get_or_throw()
    }

    /// Resolve the credential a token was issued for.
    ///
    /// Accepts the raw token or an `Authorization` header value with a
    /// `Bearer ` prefix. The prefix must be followed by a space.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is invalid, expired, for another audience or
    ///   has no usable subject
    pub fn authenticate(&self, token: &str) -> Result<CredentialId, ErrorInfo> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        Outcome::run_catching(|| self.token_service.verify(token))
            .flat_map(|claims| {
                claims
                    .sub
                    .to_outcome(ErrorInfo::unauthorized("token has no subject"))
            })
            .flat_map(|subject| Outcome::run_catching(|| CredentialId::from_string(&subject)))
            .map_error(|error| error.with_kind(ErrorKind::Unauthorized))
            .on_failure(|error| {
                tracing::warn!(error = %error, "Token rejected");
            })
            .get_or_throw()
    }
}
