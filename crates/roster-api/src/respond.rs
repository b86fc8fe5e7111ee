//! Wire responses
//!
//! Replies are `(status, body)` pairs. Three failure envelopes exist and
//! their shapes are part of the compatibility contract:
//!
//! - `{"error": {"class": ..., "message": ...}}` for authentication and
//!   not-found failures
//! - `{"errors": {field: [messages]}}` for validation failures — plural
//!   key, no nesting
//! - `{"error": "..."}` flat string for destroy failures and rejected
//!   logins
//!
//! Equivalent failure causes must always render identically, so all error
//! rendering funnels through [`render_error`].

use serde_json::{json, Value};

use crate::error::ApiError;

/// An HTTP status paired with a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,

    /// JSON body
    pub body: Value,
}

impl Reply {
    /// 200 with the given body.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// 201 with the given body.
    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    /// 200 with a `{"message": ...}` body, used by destroy successes.
    pub fn message(text: impl Into<String>) -> Self {
        Self::ok(json!({ "message": text.into() }))
    }
}

/// Map an [`ApiError`] to its wire status and envelope.
pub fn render_error(error: &ApiError) -> Reply {
    match error {
        ApiError::Auth(e) => Reply {
            status: e.status_code(),
            body: json!({ "error": { "class": e.class_name(), "message": e.to_string() } }),
        },
        ApiError::NotFound(e) => Reply {
            status: e.status_code(),
            body: json!({ "error": { "class": e.class_name(), "message": e.to_string() } }),
        },
        ApiError::Validation(errors) => Reply {
            status: 400,
            body: json!({ "errors": errors }),
        },
        ApiError::Destroy(message) => Reply {
            status: 400,
            body: json!({ "error": message }),
        },
        ApiError::InvalidCredentials => Reply {
            status: 401,
            body: json!({ "error": error.to_string() }),
        },
        ApiError::Internal(message) => Reply {
            status: 500,
            body: json!({ "error": { "class": "InternalServerError", "message": message } }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_auth::AuthError;
    use roster_org::ValidationErrors;

    #[test]
    fn test_auth_errors_render_the_class_envelope() {
        let error = ApiError::Auth(AuthError::InvalidToken(
            "ExpiredSignature: token has expired".into(),
        ));
        let reply = render_error(&error);

        assert_eq!(reply.status, 401);
        assert_eq!(
            reply.body,
            json!({
                "error": {
                    "class": "AuthenticationError::InvalidToken",
                    "message": "ExpiredSignature: token has expired"
                }
            })
        );
    }

    #[test]
    fn test_validation_renders_the_plural_errors_envelope() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "has already been taken");
        let reply = render_error(&ApiError::Validation(errors));

        assert_eq!(reply.status, 400);
        assert_eq!(reply.body, json!({ "errors": { "name": ["has already been taken"] } }));
    }

    #[test]
    fn test_destroy_renders_a_flat_string() {
        let reply = render_error(&ApiError::Destroy("Failed to delete organization!".into()));
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body, json!({ "error": "Failed to delete organization!" }));
    }

    #[test]
    fn test_rejected_login_renders_a_flat_string() {
        let reply = render_error(&ApiError::InvalidCredentials);
        assert_eq!(reply.status, 401);
        assert_eq!(
            reply.body,
            json!({ "error": "invalid email, username, or password" })
        );
    }

    #[test]
    fn test_message_reply() {
        let reply = Reply::message("Successfully deleted organization Acme Corp");
        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.body,
            json!({ "message": "Successfully deleted organization Acme Corp" })
        );
    }
}
