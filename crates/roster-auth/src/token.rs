//! Credential token codec
//!
//! Mints and decodes the signed, time-bounded identity token carried by
//! every authenticated request. Tokens embed the user id and an expiry and
//! are never stored server-side; validity is purely signature plus expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Codec configuration: the signing secret and token lifetime.
///
/// The secret is injected explicitly by the embedder; there is no ambient
/// global. The default lifetime is 60 days.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC signing secret
    pub secret: String,

    /// How long minted tokens stay valid
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create a configuration with the default 60-day token lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::days(60),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// Claims carried by a credential token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id the token acts as
    pub id: Uuid,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessClaims {
    /// Expiration as a DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Decode failure classification.
///
/// The three kinds stay distinct so diagnostics can say exactly what went
/// wrong, even though the resolver collapses all of them into a single
/// `InvalidToken` authentication failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token's expiry is in the past.
    #[error("token has expired")]
    Expired,

    /// The signature does not verify against the service secret.
    #[error("token signature verification failed")]
    BadSignature,

    /// The token is structurally invalid.
    #[error("{0}")]
    Malformed(String),
}

impl DecodeError {
    /// Short kind name, embedded as a diagnostic prefix in the rendered
    /// authentication error.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Expired => "ExpiredSignature",
            DecodeError::BadSignature => "InvalidSignature",
            DecodeError::Malformed(_) => "DecodeError",
        }
    }
}

/// Mints and verifies credential tokens (HS256).
pub struct TokenCodec {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("config", &self.config)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec from an injected configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use uuid::Uuid;
    /// use roster_auth::{AuthConfig, TokenCodec};
    ///
    /// let codec = TokenCodec::new(AuthConfig::new("service-secret"));
    /// let token = codec.mint(Uuid::now_v7(), Utc::now()).unwrap();
    /// assert!(codec.decode(&token).is_ok());
    /// ```
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a token for a user. Pure over the secret and the supplied
    /// clock: the expiry is `now` plus the configured lifetime.
    pub fn mint(&self, user_id: Uuid, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = AccessClaims {
            id: user_id,
            exp: (now + self.config.token_ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalServerError(format!("token encoding failed: {e}")))
    }

    /// Verify and decode a token, classifying failures into the three
    /// [`DecodeError`] kinds.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, DecodeError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data: TokenData<AccessClaims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => DecodeError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => DecodeError::BadSignature,
                _ => DecodeError::Malformed(e.to_string()),
            })?;

        Ok(data.claims)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(AuthConfig::new("test-secret-key-for-token-signing"))
    }

    #[test]
    fn test_mint_and_decode_round_trip() {
        let codec = codec();
        let user_id = Uuid::now_v7();
        let now = Utc::now();

        let token = codec.mint(user_id, now).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.id, user_id);
        assert_eq!(claims.exp, (now + Duration::days(60)).timestamp());
    }

    #[test]
    fn test_token_valid_before_expiry() {
        let codec = codec();
        let token = codec
            .mint(Uuid::now_v7(), Utc::now() - Duration::days(59))
            .unwrap();
        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn test_token_expired_after_lifetime() {
        let codec = codec();
        let token = codec
            .mint(Uuid::now_v7(), Utc::now() - Duration::days(61))
            .unwrap();
        assert!(matches!(codec.decode(&token), Err(DecodeError::Expired)));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let token = codec().mint(Uuid::now_v7(), Utc::now()).unwrap();
        let other = TokenCodec::new(AuthConfig::new("a-completely-different-secret"));
        assert!(matches!(
            other.decode(&token),
            Err(DecodeError::BadSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            codec().decode("not-a-token"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_ttl_override() {
        let codec = TokenCodec::new(
            AuthConfig::new("test-secret-key-for-token-signing").with_ttl(Duration::hours(1)),
        );
        let now = Utc::now();
        let token = codec.mint(Uuid::now_v7(), now).unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.exp, (now + Duration::hours(1)).timestamp());
    }
}
