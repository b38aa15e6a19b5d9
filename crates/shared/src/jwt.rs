//! JWT token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::JwtConfig;
use crate::types::Tier;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    token_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_ttl", &self.token_ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            token_ttl: Duration::try_seconds(config.token_expiry_secs)
                .unwrap_or_else(|| Duration::days(30)),
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_token(&self, user_id: Uuid, tier: Tier) -> Result<String, JwtError> {
        let expires_at = Utc::now() + self.token_ttl;
        let claims = Claims::new(user_id, tier, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the token lifetime in seconds.
    #[must_use]
    pub const fn expires_in(&self) -> i64 {
        self.token_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service(secret: &str, ttl_secs: i64) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            token_expiry_secs: ttl_secs,
        })
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = create_test_service("test-secret-key-for-testing", 3600);
        let user_id = Uuid::new_v4();

        let token = service.generate_token(user_id, Tier::Trial).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.tier, Tier::Trial);
        assert_eq!(service.expires_in(), 3600);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service("test-secret-key-for-testing", 3600);
        let result = service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingError(_))));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let issuer = create_test_service("secret-a", 3600);
        let verifier = create_test_service("secret-b", 3600);

        let token = issuer.generate_token(Uuid::new_v4(), Tier::Pro).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // Default validation allows 60s of leeway.
        let service = create_test_service("test-secret-key-for-testing", -120);
        let token = service.generate_token(Uuid::new_v4(), Tier::Trial).unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
    }
}
