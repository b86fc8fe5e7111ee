//! Error types for authentication
//!
//! Authentication failures are a closed family of three kinds. All of them
//! render as HTTP 401; the kind name travels on the wire as the error class
//! and the message carries the lower-level diagnostic that produced it.

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token verified but references an identity that does not exist.
    /// This is an authentication failure, not a resource lookup failure:
    /// the caller is attempting to act as a nonexistent user.
    #[error("{0}")]
    UserNotFound(String),

    /// The token was malformed, expired, or failed signature verification.
    #[error("{0}")]
    InvalidToken(String),

    /// An unexpected failure while resolving the identity.
    #[error("{0}")]
    InternalServerError(String),
}

impl AuthError {
    /// Fully-qualified kind name rendered as the wire `class` field.
    pub fn class_name(&self) -> &'static str {
        match self {
            AuthError::UserNotFound(_) => "AuthenticationError::UserNotFound",
            AuthError::InvalidToken(_) => "AuthenticationError::InvalidToken",
            AuthError::InternalServerError(_) => "AuthenticationError::InternalServerError",
        }
    }

    /// HTTP status code for this error. Every authentication failure is a
    /// 401, whatever the underlying cause.
    pub fn status_code(&self) -> u16 {
        401
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(
            AuthError::UserNotFound(String::new()).class_name(),
            "AuthenticationError::UserNotFound"
        );
        assert_eq!(
            AuthError::InvalidToken(String::new()).class_name(),
            "AuthenticationError::InvalidToken"
        );
        assert_eq!(
            AuthError::InternalServerError(String::new()).class_name(),
            "AuthenticationError::InternalServerError"
        );
    }

    #[test]
    fn test_every_variant_is_unauthorized() {
        assert_eq!(AuthError::UserNotFound(String::new()).status_code(), 401);
        assert_eq!(AuthError::InvalidToken(String::new()).status_code(), 401);
        assert_eq!(
            AuthError::InternalServerError(String::new()).status_code(),
            401
        );
    }
}
