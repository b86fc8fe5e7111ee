//! User domain model
//!
//! Users are the accounts that authenticate against the platform. A user
//! owns memberships linking it to organizations; the credential digest is
//! stored alongside but never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password;
use crate::validate::{self, ValidationErrors};

/// A registered account.
///
/// # Examples
///
/// ```
/// use roster_org::{password, User};
///
/// let user = User::new("ada@example.com", "ada", password::hash("lovelace1"));
/// assert!(user.authenticate("lovelace1"));
/// assert!(!user.authenticate("babbage"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Email address (unique)
    pub email: String,

    /// Username (unique case-insensitively, alphanumeric only)
    pub username: String,

    /// Salted credential digest. Never exposed on the wire.
    #[serde(skip_serializing, default)]
    pub password_digest: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly generated UUID v7 id and current
    /// timestamps. The caller supplies an already-hashed credential.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_digest: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            username: username.into(),
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a plaintext password against the stored credential digest.
    pub fn authenticate(&self, password: &str) -> bool {
        password::verify(password, &self.password_digest)
    }
}

/// Insert/update attributes for a user. Absent fields are left untouched on
/// update and fail presence validation on insert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserParams {
    /// Email address
    pub email: Option<String>,

    /// Username
    pub username: Option<String>,

    /// Plaintext password, hashed before storage
    pub password: Option<String>,
}

/// Uniqueness probes computed by the persistence layer.
///
/// The store owns the data, so it answers the "is this value already taken"
/// questions and hands the answers to [`validate`], keeping the validation
/// function itself pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserScope {
    /// Another user already has this email
    pub email_taken: bool,

    /// Another user already has this username (case-insensitive)
    pub username_taken: bool,
}

/// Validate candidate user attributes.
///
/// `password` is the plaintext being set, if any; `password_required` is
/// true on insert and false on an update that leaves the credential
/// unchanged. Returns the field→messages map; empty means valid.
pub fn validate(
    email: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
    password_required: bool,
    scope: UserScope,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if validate::present(email) {
        let email = email.unwrap_or_default();
        if !is_email(email) {
            errors.add("email", validate::NOT_EMAIL);
        }
        if scope.email_taken {
            errors.add("email", validate::TAKEN);
        }
    } else {
        errors.add("email", validate::BLANK);
        errors.add("email", validate::NOT_EMAIL);
    }

    if validate::present(username) {
        let username = username.unwrap_or_default();
        if !is_alphanumeric(username) {
            errors.add("username", validate::INVALID);
        }
        if scope.username_taken {
            errors.add("username", validate::TAKEN);
        }
    } else {
        errors.add("username", validate::BLANK);
        errors.add("username", validate::INVALID);
    }

    match password {
        Some(p) if !p.trim().is_empty() => {
            if p.len() < 6 {
                errors.add("password", validate::TOO_SHORT);
            } else if p.len() > 256 {
                errors.add("password", validate::TOO_LONG);
            }
        }
        _ if password_required => {
            errors.add("password", validate::BLANK);
            errors.add("password", validate::TOO_SHORT);
        }
        _ => {}
    }

    errors
}

/// Email shape check: `local@label.tld`, where the local part has no
/// whitespace or `@`, domain labels are alphanumeric-or-dash, and the TLD is
/// at least two letters.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') || local.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    labels[..labels.len() - 1].iter().all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{BLANK, INVALID, NOT_EMAIL, TAKEN, TOO_SHORT};

    fn valid() -> ValidationErrors {
        validate(
            Some("ada@example.com"),
            Some("ada"),
            Some("lovelace1"),
            true,
            UserScope::default(),
        )
    }

    #[test]
    fn test_valid_attributes() {
        assert!(valid().is_empty());
    }

    #[test]
    fn test_blank_email() {
        let errors = validate(None, Some("ada"), Some("lovelace1"), true, UserScope::default());
        assert_eq!(errors.messages("email"), &[BLANK, NOT_EMAIL]);
    }

    #[test]
    fn test_malformed_email() {
        for bad in ["adaexample.com", "ada@", "@example.com", "ada@com", "a a@example.com", "ada@example.c"] {
            let errors = validate(Some(bad), Some("ada"), Some("lovelace1"), true, UserScope::default());
            assert_eq!(errors.messages("email"), &[NOT_EMAIL], "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_accepted_emails() {
        for good in ["ada@example.com", "a.b+c@mail.example.co", "x@sub-domain.example.io"] {
            let errors = validate(Some(good), Some("ada"), Some("lovelace1"), true, UserScope::default());
            assert!(errors.messages("email").is_empty(), "expected {good:?} to be accepted");
        }
    }

    #[test]
    fn test_taken_email_and_username() {
        let errors = validate(
            Some("ada@example.com"),
            Some("ada"),
            Some("lovelace1"),
            true,
            UserScope { email_taken: true, username_taken: true },
        );
        assert_eq!(errors.messages("email"), &[TAKEN]);
        assert_eq!(errors.messages("username"), &[TAKEN]);
    }

    #[test]
    fn test_username_format() {
        let errors = validate(
            Some("ada@example.com"),
            Some("ada/lovelace"),
            Some("lovelace1"),
            true,
            UserScope::default(),
        );
        assert_eq!(errors.messages("username"), &[INVALID]);
    }

    #[test]
    fn test_password_length_bounds() {
        let errors = validate(
            Some("ada@example.com"),
            Some("ada"),
            Some("short"),
            true,
            UserScope::default(),
        );
        assert_eq!(errors.messages("password"), &[TOO_SHORT]);

        let long = "x".repeat(257);
        let errors = validate(
            Some("ada@example.com"),
            Some("ada"),
            Some(&long),
            true,
            UserScope::default(),
        );
        assert_eq!(errors.messages("password"), &[validate::TOO_LONG]);
    }

    #[test]
    fn test_password_optional_on_update() {
        let errors = validate(
            Some("ada@example.com"),
            Some("ada"),
            None,
            false,
            UserScope::default(),
        );
        assert!(errors.is_empty());
    }
}
