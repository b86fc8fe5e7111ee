//! API error taxonomy
//!
//! Every operation either succeeds or produces exactly one of these
//! failures. Lower-layer errors are reclassified here, with the original
//! kind embedded as a diagnostic prefix in the message so nothing is lost
//! on the way up.

use thiserror::Error;

use roster_auth::AuthError;
use roster_org::ValidationErrors;
use roster_store::{Resource, StoreError};

/// A resource lookup that found nothing. Renders as HTTP 404.
///
/// Messages carry the lower-level failure kind as a prefix, e.g.
/// `RecordNotFound: Couldn't find organization with id: <id>`.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// No such organization.
    #[error("{0}")]
    Organization(String),

    /// No such membership.
    #[error("{0}")]
    Membership(String),

    /// No such event (including an event addressed under the wrong
    /// organization).
    #[error("{0}")]
    Event(String),
}

impl NotFoundError {
    /// Fully-qualified kind name rendered as the wire `class` field.
    pub fn class_name(&self) -> &'static str {
        match self {
            NotFoundError::Organization(_) => "OrganizationError::OrganizationNotFound",
            NotFoundError::Membership(_) => "MembershipError::MembershipNotFound",
            NotFoundError::Event(_) => "EventError::EventNotFound",
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        404
    }
}

/// Top-level failure produced by any API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed (401).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A resource lookup found nothing (404).
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A write failed validation (400, `errors` envelope).
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A destroy did not take effect for a reason other than the row
    /// missing (400, flat `error` string).
    #[error("{0}")]
    Destroy(String),

    /// Login with a wrong email, username, or password (401, flat `error`
    /// string).
    #[error("invalid email, username, or password")]
    InvalidCredentials,

    /// The persistence backend failed outside of identity resolution (500).
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        let diagnostic = format!("{}: {}", error.kind(), error);
        match error {
            StoreError::RecordNotFound { resource, .. } => match resource {
                Resource::Organization => NotFoundError::Organization(diagnostic).into(),
                Resource::Membership => NotFoundError::Membership(diagnostic).into(),
                Resource::Event => NotFoundError::Event(diagnostic).into(),
                // A missing user row at this level means the caller is
                // acting as an identity that no longer exists.
                Resource::User => ApiError::Auth(AuthError::UserNotFound(diagnostic)),
            },
            StoreError::RecordInvalid(errors) => ApiError::Validation(errors),
            StoreError::Backend(_) => ApiError::Internal(diagnostic),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_reclassification_keeps_kind_prefix() {
        let id = Uuid::nil();
        let err: ApiError = StoreError::RecordNotFound {
            resource: Resource::Organization,
            id,
        }
        .into();

        let ApiError::NotFound(not_found) = err else {
            panic!("expected NotFound");
        };
        assert_eq!(not_found.class_name(), "OrganizationError::OrganizationNotFound");
        assert_eq!(
            not_found.to_string(),
            format!("RecordNotFound: Couldn't find organization with id: {id}")
        );
    }

    #[test]
    fn test_missing_user_row_is_an_auth_failure() {
        let err: ApiError = StoreError::RecordNotFound {
            resource: Resource::User,
            id: Uuid::nil(),
        }
        .into();
        assert!(matches!(err, ApiError::Auth(AuthError::UserNotFound(_))));
    }

    #[test]
    fn test_invalid_write_carries_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "has already been taken");
        let err: ApiError = StoreError::RecordInvalid(errors).into();

        let ApiError::Validation(errors) = err else {
            panic!("expected Validation");
        };
        assert_eq!(errors.messages("name"), &["has already been taken"]);
    }
}
