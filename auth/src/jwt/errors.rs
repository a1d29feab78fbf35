use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token audience is invalid")]
    InvalidAudience,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

impl JwtError {
    /// True when the error is a verdict on the token itself rather than a
    /// failure of the signing machinery.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            JwtError::DecodingFailed(_)
                | JwtError::TokenExpired
                | JwtError::InvalidAudience
                | JwtError::InvalidToken(_)
                | JwtError::MissingClaim(_)
        )
    }
}
