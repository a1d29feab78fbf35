use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Registered JWT claims plus a flattened map of custom claims.
///
/// All registered fields are optional so the same type can decode tokens
/// minted by other issuers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (credential identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Custom claims, flattened into the token payload
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a subject and audience, expiring `expiration_minutes` from now.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token is issued for
    /// * `audience` - Intended recipient of the token
    /// * `expiration_minutes` - Minutes until the token expires
    ///
    /// # Returns
    /// Claims with sub, aud, iat and exp set
    pub fn for_subject(
        subject: impl ToString,
        audience: impl ToString,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::minutes(expiration_minutes);

        Self {
            sub: Some(subject.to_string()),
            aud: Some(audience.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            iss: None,
            extra: Map::new(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Merge custom claims. Registered claim names are left untouched.
    pub fn with_custom_claims(mut self, custom: Map<String, Value>) -> Self {
        for (key, value) in custom {
            if !Self::is_registered(&key) {
                self.extra.insert(key, value);
            }
        }
        self
    }

    fn is_registered(name: &str) -> bool {
        matches!(name, "sub" | "aud" | "exp" | "iat" | "iss" | "nbf" | "jti")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", "app", 60);

        assert_eq!(claims.sub.as_deref(), Some("user123"));
        assert_eq!(claims.aud.as_deref(), Some("app"));
        assert!(claims.extra.is_empty());

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 60 * 60);
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("user123")
            .with_audience("app")
            .with_expiration(1234567890);

        assert_eq!(claims.sub.as_deref(), Some("user123"));
        assert_eq!(claims.aud.as_deref(), Some("app"));
        assert_eq!(claims.exp, Some(1234567890));
        assert!(claims.iss.is_none());
    }

    #[test]
    fn test_custom_claims_cannot_override_registered_ones() {
        let mut custom = Map::new();
        custom.insert("role".to_string(), json!("admin"));
        custom.insert("sub".to_string(), json!("someone-else"));

        let claims = Claims::for_subject("user123", "app", 60).with_custom_claims(custom);

        assert_eq!(claims.sub.as_deref(), Some("user123"));
        assert_eq!(claims.extra.get("role"), Some(&json!("admin")));
        assert!(!claims.extra.contains_key("sub"));
    }
}
