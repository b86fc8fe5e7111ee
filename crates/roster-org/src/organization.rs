//! Organization domain model
//!
//! Organizations are the top-level tenant entities. They own memberships
//! (linking users in) and host events; deleting an organization removes both
//! sets of dependents with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// A tenant organization.
///
/// # Examples
///
/// ```
/// use roster_org::Organization;
///
/// let org = Organization::new("Acme Corp", 12, "Makers of everything");
/// assert_eq!(org.name, "Acme Corp");
/// assert_eq!(org.total_members, 12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (unique case-insensitively)
    pub name: String,

    /// Member head-count as reported by the organization
    pub total_members: i64,

    /// Free-form description
    pub description: String,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization with a generated UUID v7 id and current
    /// timestamps.
    pub fn new(name: impl Into<String>, total_members: i64, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            total_members,
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert/update attributes for an organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationParams {
    /// Display name
    pub name: Option<String>,

    /// Member head-count
    pub total_members: Option<i64>,

    /// Free-form description
    pub description: Option<String>,
}

/// Uniqueness probes computed by the persistence layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationScope {
    /// Another organization already has this name (case-insensitive)
    pub name_taken: bool,
}

/// Validate candidate organization attributes. Returns the field→messages
/// map; empty means valid.
pub fn validate(
    name: Option<&str>,
    total_members: Option<i64>,
    description: Option<&str>,
    scope: OrganizationScope,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if validate::present(name) {
        if scope.name_taken {
            errors.add("name", validate::TAKEN);
        }
    } else {
        errors.add("name", validate::BLANK);
    }

    if total_members.is_none() {
        errors.add("total_members", validate::BLANK);
    }

    if !validate::present(description) {
        errors.add("description", validate::BLANK);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{BLANK, TAKEN};

    #[test]
    fn test_valid_attributes() {
        let errors = validate(
            Some("Acme Corp"),
            Some(0),
            Some("Test description."),
            OrganizationScope::default(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_fields() {
        let errors = validate(None, None, Some("  "), OrganizationScope::default());
        assert_eq!(errors.messages("name"), &[BLANK]);
        assert_eq!(errors.messages("total_members"), &[BLANK]);
        assert_eq!(errors.messages("description"), &[BLANK]);
    }

    #[test]
    fn test_taken_name() {
        let errors = validate(
            Some("Acme Corp"),
            Some(0),
            Some("Test description."),
            OrganizationScope { name_taken: true },
        );
        assert_eq!(errors.messages("name"), &[TAKEN]);
    }

    #[test]
    fn test_taken_is_not_reported_for_blank_name() {
        let errors = validate(None, Some(0), Some("d"), OrganizationScope { name_taken: true });
        assert_eq!(errors.messages("name"), &[BLANK]);
    }
}
