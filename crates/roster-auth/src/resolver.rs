//! Identity resolution
//!
//! Turns a raw Authorization header into an authenticated [`User`], or a
//! classified [`AuthError`]. Resolution never mutates persisted state; two
//! resolutions of the same valid token before its expiry always yield the
//! same identity. [`RequestAuth`] memoizes the result for one request
//! lifecycle so handlers can re-ask without re-decoding.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use roster_org::User;
use roster_store::{Store, StoreError};

use crate::error::{AuthError, AuthResult};
use crate::token::TokenCodec;

/// Resolves credential tokens into identities.
pub struct Authenticator {
    codec: TokenCodec,
    store: Arc<dyn Store>,
}

impl Authenticator {
    /// Create a resolver over a codec and the persistence collaborator.
    pub fn new(codec: TokenCodec, store: Arc<dyn Store>) -> Self {
        Self { codec, store }
    }

    /// The codec, for minting tokens at registration and login.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Resolve an Authorization header value of the form `Scheme <token>`.
    ///
    /// The scheme is ignored; the token is the last whitespace-delimited
    /// segment. An absent header, or one without a second segment, fails
    /// decode. Signature, expiry, and structural failures all classify as
    /// `InvalidToken`; a verified token referencing a missing user is
    /// `UserNotFound`; anything unexpected is `InternalServerError`.
    pub async fn authenticate(&self, header: Option<&str>) -> AuthResult<User> {
        let token = extract_token(header).ok_or_else(|| {
            AuthError::InvalidToken(
                "DecodeError: Authorization header carries no token".to_string(),
            )
        })?;

        let claims = self.codec.decode(token).map_err(|e| {
            warn!(error = %e, "token decode failed");
            AuthError::InvalidToken(format!("{}: {}", e.kind(), e))
        })?;

        match self.store.find_user(claims.id).await {
            Ok(user) => {
                debug!(user_id = %user.id, "authenticated");
                Ok(user)
            }
            Err(e @ StoreError::RecordNotFound { .. }) => {
                Err(AuthError::UserNotFound(format!("{}: {}", e.kind(), e)))
            }
            Err(e) => Err(AuthError::InternalServerError(format!("{}: {}", e.kind(), e))),
        }
    }

    /// Match a login (email or username) against a stored credential.
    /// Returns `None` for an unknown login or a wrong password; the caller
    /// decides how that renders.
    pub async fn verify_credentials(
        &self,
        login: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        let user = self
            .store
            .find_user_by_login(login)
            .await
            .map_err(|e| AuthError::InternalServerError(format!("{}: {}", e.kind(), e)))?;
        Ok(user.filter(|u| u.authenticate(password)))
    }
}

/// Per-request identity cache.
///
/// Handlers hold one of these per inbound request; the first
/// [`current_user`](RequestAuth::current_user) call resolves the header and
/// later calls return the same identity without touching the codec or the
/// store again.
pub struct RequestAuth {
    header: Option<String>,
    resolved: OnceCell<User>,
}

impl RequestAuth {
    /// Wrap the raw Authorization header value of one request.
    pub fn new(header: Option<&str>) -> Self {
        Self {
            header: header.map(str::to_owned),
            resolved: OnceCell::new(),
        }
    }

    /// The resolved identity, memoized for this request's lifetime.
    pub async fn current_user(&self, authenticator: &Authenticator) -> AuthResult<&User> {
        self.resolved
            .get_or_try_init(|| authenticator.authenticate(self.header.as_deref()))
            .await
    }
}

fn extract_token(header: Option<&str>) -> Option<&str> {
    let parts: Vec<&str> = header?.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }
    parts.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use roster_org::UserParams;
    use roster_store::MemoryStore;
    use uuid::Uuid;

    use crate::token::AuthConfig;

    async fn fixture() -> (Authenticator, Arc<MemoryStore>, User) {
        let store = Arc::new(MemoryStore::new());
        let user = store
            .create_user(UserParams {
                email: Some("ada@example.com".into()),
                username: Some("ada".into()),
                password: Some("lovelace1".into()),
            })
            .await
            .unwrap();
        let codec = TokenCodec::new(AuthConfig::new("test-secret-key-for-token-signing"));
        let authenticator = Authenticator::new(codec, store.clone() as Arc<dyn Store>);
        (authenticator, store, user)
    }

    #[test]
    fn test_extract_token_takes_last_segment() {
        assert_eq!(extract_token(Some("Token abc")), Some("abc"));
        assert_eq!(extract_token(Some("Bearer  abc")), Some("abc"));
        assert_eq!(extract_token(Some("A B C")), Some("C"));
    }

    #[test]
    fn test_extract_token_requires_two_segments() {
        assert_eq!(extract_token(None), None);
        assert_eq!(extract_token(Some("")), None);
        assert_eq!(extract_token(Some("lone-token")), None);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let (authenticator, _store, user) = fixture().await;
        let token = authenticator.codec().mint(user.id, Utc::now()).unwrap();

        let resolved = authenticator
            .authenticate(Some(&format!("Token {token}")))
            .await
            .unwrap();
        assert_eq!(resolved.id, user.id);

        // Resolution is repeatable and side-effect free.
        let again = authenticator
            .authenticate(Some(&format!("Token {token}")))
            .await
            .unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_missing_header_is_invalid_token() {
        let (authenticator, _, _) = fixture().await;
        let err = authenticator.authenticate(None).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_schemeless_header_is_invalid_token() {
        let (authenticator, _, user) = fixture().await;
        let token = authenticator.codec().mint(user.id, Utc::now()).unwrap();

        // The bare token with no scheme segment fails decode outright.
        let err = authenticator.authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_expired_token_is_invalid_token() {
        let (authenticator, _, user) = fixture().await;
        let token = authenticator
            .codec()
            .mint(user.id, Utc::now() - Duration::days(61))
            .unwrap();

        let err = authenticator
            .authenticate(Some(&format!("Token {token}")))
            .await
            .unwrap_err();
        let AuthError::InvalidToken(message) = err else {
            panic!("expected InvalidToken, got {err:?}");
        };
        assert!(message.starts_with("ExpiredSignature:"), "message: {message}");
    }

    #[tokio::test]
    async fn test_token_for_missing_user_is_user_not_found() {
        let (authenticator, _, _) = fixture().await;
        let ghost = Uuid::now_v7();
        let token = authenticator.codec().mint(ghost, Utc::now()).unwrap();

        let err = authenticator
            .authenticate(Some(&format!("Token {token}")))
            .await
            .unwrap_err();
        let AuthError::UserNotFound(message) = err else {
            panic!("expected UserNotFound, got {err:?}");
        };
        assert_eq!(
            message,
            format!("RecordNotFound: Couldn't find user with id: {ghost}")
        );
    }

    #[tokio::test]
    async fn test_request_auth_memoizes_resolution() {
        let (authenticator, store, user) = fixture().await;
        let token = authenticator.codec().mint(user.id, Utc::now()).unwrap();
        let header = format!("Token {token}");
        let request = RequestAuth::new(Some(header.as_str()));

        let first = request.current_user(&authenticator).await.unwrap().id;
        assert_eq!(first, user.id);

        // Even with the row gone, the cached identity stands for the rest
        // of the request.
        store.delete_user(user.id).await.unwrap();
        let second = request.current_user(&authenticator).await.unwrap().id;
        assert_eq!(second, user.id);
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let (authenticator, _, user) = fixture().await;

        let by_email = authenticator
            .verify_credentials("ada@example.com", "lovelace1")
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_username = authenticator
            .verify_credentials("ada", "lovelace1")
            .await
            .unwrap();
        assert_eq!(by_username.map(|u| u.id), Some(user.id));

        assert!(authenticator
            .verify_credentials("ada", "wrong-password")
            .await
            .unwrap()
            .is_none());
        assert!(authenticator
            .verify_credentials("nobody", "lovelace1")
            .await
            .unwrap()
            .is_none());
    }
}
