use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for signing and verifying tokens.
///
/// Generic over the claims type so callers can define their own payload.
/// Signs with HS256 for a shared secret or RS256 for a PEM key pair.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    audience: Option<String>,
}

impl JwtHandler {
    /// Create a handler that signs with HS256.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret, at least 32 bytes
    ///
    /// # Returns
    /// JwtHandler configured with HS256 and no expected audience
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            audience: None,
        }
    }

    /// Create a handler that signs with an RSA private key and verifies with
    /// the matching public key (RS256).
    ///
    /// # Arguments
    /// * `private_pem` - PKCS#1 or PKCS#8 private key in PEM form (unencrypted)
    /// * `public_pem` - Matching public key in PEM form
    ///
    /// # Errors
    /// * `InvalidKey` - Either key could not be parsed
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| JwtError::InvalidKey(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
            audience: None,
        })
    }

    /// Require the given audience when decoding.
    pub fn with_audience(mut self, audience: impl ToString) -> Self {
        self.audience = Some(audience.to_string());
        self
    }

    /// Signing algorithm in use.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// The `exp` claim is required. When an audience was configured the token
    /// must carry it; otherwise the audience is not checked.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its `exp`
    /// * `InvalidAudience` - Token was issued for another audience
    /// * `InvalidToken` - Signature mismatch or malformed token
    /// * `MissingClaim` - A required claim is absent
    /// * `DecodingFailed` - Any other decoding failure
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidAudience => JwtError::InvalidAudience,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::ImmatureSignature => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
