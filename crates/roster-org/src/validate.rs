//! Field-keyed validation errors
//!
//! This module provides the `ValidationErrors` map returned by every entity
//! validation function, along with the canonical message strings shared by
//! the application-level validators and the persistence layer's constraint
//! backstop. The wire contract renders the map verbatim under the plural
//! `errors` envelope key.

use serde::Serialize;
use std::collections::BTreeMap;

/// Message for a missing required value.
pub const BLANK: &str = "can't be blank";

/// Message for a uniqueness violation.
pub const TAKEN: &str = "has already been taken";

/// Message for a reference to a missing related record.
pub const MUST_EXIST: &str = "must exist";

/// Message for a malformed email address.
pub const NOT_EMAIL: &str = "is not an email";

/// Message for a value failing a format check.
pub const INVALID: &str = "is invalid";

/// Message for a password below the minimum length.
pub const TOO_SHORT: &str = "is too short (minimum is 6 characters)";

/// Message for a password above the maximum length.
pub const TOO_LONG: &str = "is too long (maximum is 256 characters)";

/// Accumulated validation failures, keyed by field name.
///
/// Fields are ordered deterministically (BTreeMap) so rendered payloads are
/// stable. A field may carry several messages; messages are kept in the
/// order they were added.
///
/// # Examples
///
/// ```
/// use roster_org::validate::{ValidationErrors, BLANK};
///
/// let mut errors = ValidationErrors::new();
/// errors.add("name", BLANK);
/// assert!(!errors.is_empty());
/// assert_eq!(errors.messages("name"), &["can't be blank"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    ///
    /// Duplicate messages for the same field are kept only once, matching
    /// how a constraint backstop re-reporting an already-detected violation
    /// must not double up on the wire.
    pub fn add(&mut self, field: &str, message: &str) {
        let messages = self.fields.entry(field.to_string()).or_default();
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_string());
        }
    }

    /// True when no failures have been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, empty when the field is clean.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Convert to a result, failing when any message was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Presence check with blank-string semantics: whitespace-only counts as
/// absent.
pub fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut errors = ValidationErrors::new();
        errors.add("name", BLANK);
        errors.add("name", TAKEN);

        assert_eq!(errors.messages("name"), &[BLANK, TAKEN]);
        assert!(errors.messages("description").is_empty());
    }

    #[test]
    fn test_duplicate_messages_collapse() {
        let mut errors = ValidationErrors::new();
        errors.add("user", TAKEN);
        errors.add("user", TAKEN);

        assert_eq!(errors.messages("user").len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("email", NOT_EMAIL);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("email", BLANK);
        errors.add("username", INVALID);

        assert_eq!(errors.to_string(), "email can't be blank, username is invalid");
    }

    #[test]
    fn test_present() {
        assert!(present(Some("value")));
        assert!(!present(Some("   ")));
        assert!(!present(Some("")));
        assert!(!present(None));
    }
}
