use std::fs;

use anyhow::bail;
use anyhow::Context;
use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use auth::PasswordError;
use auth::PasswordHasher;
use serde_json::Map;
use serde_json::Value;

use crate::config::TokenConfig;
use crate::domain::auth::ports::PasswordService;
use crate::domain::auth::ports::TokenService;

const MIN_SECRET_LEN: usize = 32;

impl PasswordService for PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, plaintext)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, plaintext, hash)
    }
}

/// [`TokenService`] backed by the auth library's [`JwtHandler`].
pub struct JwtTokenService {
    handler: JwtHandler,
}

impl JwtTokenService {
    pub fn new(handler: JwtHandler) -> Self {
        Self { handler }
    }

    /// Build the signer described by the `token` configuration section.
    ///
    /// An RSA key pair takes precedence over a shared secret. Verification
    /// requires the configured audience.
    ///
    /// # Errors
    /// * Neither a secret nor a complete key pair is configured
    /// * Only one of the two key paths is set
    /// * The secret is shorter than 32 bytes
    /// * A key file cannot be read or parsed
    pub fn from_config(config: &TokenConfig) -> anyhow::Result<Self> {
        let handler = match (
            &config.private_key_path,
            &config.public_key_path,
            &config.secret,
        ) {
            (Some(private_path), Some(public_path), _) => {
                let private_pem = fs::read(private_path).with_context(|| {
                    format!("Failed to read private key {}", private_path.display())
                })?;
                let public_pem = fs::read(public_path).with_context(|| {
                    format!("Failed to read public key {}", public_path.display())
                })?;
                JwtHandler::from_rsa_pem(&private_pem, &public_pem)?
            }
            (None, None, Some(secret)) => {
                if secret.len() < MIN_SECRET_LEN {
                    bail!("token.secret must be at least {MIN_SECRET_LEN} bytes");
                }
                JwtHandler::new(secret.as_bytes())
            }
            (Some(_), None, _) | (None, Some(_), _) => bail!(
                "token.private_key_path and token.public_key_path must be set together"
            ),
            (None, None, None) => bail!(
                "token signing needs either token.secret or both token.private_key_path and token.public_key_path"
            ),
        };

        tracing::info!(
            algorithm = ?handler.algorithm(),
            audience = %config.audience,
            "Token signer configured"
        );

        Ok(Self::new(handler.with_audience(&config.audience)))
    }
}

impl TokenService for JwtTokenService {
    fn sign(
        &self,
        subject: &str,
        audience: &str,
        expiration_minutes: i64,
        custom_claims: Option<Map<String, Value>>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, audience, expiration_minutes)
            .with_custom_claims(custom_claims.unwrap_or_default());

        self.handler.encode(&claims)
    }

    fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn config() -> TokenConfig {
        TokenConfig {
            secret: Some(SECRET.to_string()),
            ..TokenConfig::default()
        }
    }

    #[test]
    fn test_password_service_uses_argon2() {
        let hasher = PasswordHasher::new();
        let service: &dyn PasswordService = &hasher;

        let hash = service.hash("pw123456").expect("Failed to hash password");
        assert!(service.verify("pw123456", &hash).unwrap());
        assert!(!service.verify("pw654321", &hash).unwrap());
    }

    #[test]
    fn test_sign_and_verify() {
        let service = JwtTokenService::from_config(&config()).expect("config rejected");

        let mut custom = Map::new();
        custom.insert("role".to_string(), json!("admin"));

        let token = service
            .sign("user123", "app", 60, Some(custom))
            .expect("Failed to sign");
        let claims = service.verify(&token).expect("Failed to verify");

        assert_eq!(claims.sub.as_deref(), Some("user123"));
        assert_eq!(claims.aud.as_deref(), Some("app"));
        assert_eq!(claims.extra.get("role"), Some(&json!("admin")));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 3600);
    }

    #[test]
    fn test_verify_rejects_other_audience() {
        let service = JwtTokenService::from_config(&config()).expect("config rejected");

        let token = service
            .sign("user123", "admin-console", 60, None)
            .expect("Failed to sign");

        assert!(matches!(
            service.verify(&token),
            Err(JwtError::InvalidAudience)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = JwtTokenService::from_config(&config()).expect("config rejected");

        let token = service
            .sign("user123", "app", -10, None)
            .expect("Failed to sign");

        assert!(matches!(service.verify(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_from_config_requires_key_material() {
        let result = JwtTokenService::from_config(&TokenConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_rejects_half_configured_key_pair() {
        let config = TokenConfig {
            secret: Some(SECRET.to_string()),
            private_key_path: Some("keys/private.pem".into()),
            ..TokenConfig::default()
        };

        let error = JwtTokenService::from_config(&config).err().unwrap();
        assert!(error.to_string().contains("must be set together"));
    }

    #[test]
    fn test_from_config_rejects_short_secret() {
        let config = TokenConfig {
            secret: Some("short".to_string()),
            ..TokenConfig::default()
        };

        let error = JwtTokenService::from_config(&config).err().unwrap();
        assert!(error.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn test_from_config_reports_missing_key_file() {
        let config = TokenConfig {
            private_key_path: Some("/nonexistent/private.pem".into()),
            public_key_path: Some("/nonexistent/public.pem".into()),
            ..TokenConfig::default()
        };

        let error = JwtTokenService::from_config(&config).err().unwrap();
        assert!(error.to_string().contains("private key"));
    }
}
