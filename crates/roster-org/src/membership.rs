//! Membership domain model
//!
//! Memberships link users to organizations. The (user, organization) pair is
//! unique in both projections: a duplicate insert fails validation on both
//! fields at once, each with its own uniqueness message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// A user's membership in an organization.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use roster_org::Membership;
///
/// let membership = Membership::new(Uuid::now_v7(), Uuid::now_v7());
/// assert_ne!(membership.user_id, membership.organization_id);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier
    pub id: Uuid,

    /// Member user
    pub user_id: Uuid,

    /// Organization joined
    pub organization_id: Uuid,

    /// When the membership was created
    pub created_at: DateTime<Utc>,

    /// When the membership was last updated
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new membership with a generated UUID v7 id and current
    /// timestamps.
    pub fn new(user_id: Uuid, organization_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            organization_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert/update attributes for a membership.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MembershipParams {
    /// Member user id
    pub user_id: Option<Uuid>,

    /// Organization id
    pub organization_id: Option<Uuid>,
}

/// Existence and uniqueness probes computed by the persistence layer.
///
/// Errors are keyed by association name (`user`, `organization`), not by the
/// id columns — the wire contract reports a missing reference as
/// `user: ["must exist"]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipScope {
    /// The referenced user row exists
    pub user_exists: bool,

    /// The referenced organization row exists
    pub organization_exists: bool,

    /// Another membership already links this (user, organization) pair
    pub pair_taken: bool,
}

/// Validate a candidate membership. Returns the field→messages map; empty
/// means valid.
pub fn validate(scope: MembershipScope) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !scope.user_exists {
        errors.add("user", validate::MUST_EXIST);
    }
    if !scope.organization_exists {
        errors.add("organization", validate::MUST_EXIST);
    }
    if scope.pair_taken {
        // The pair is unique in both projections, so both sides report it.
        errors.add("user", validate::TAKEN);
        errors.add("organization", validate::TAKEN);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{MUST_EXIST, TAKEN};

    fn all_good() -> MembershipScope {
        MembershipScope {
            user_exists: true,
            organization_exists: true,
            pair_taken: false,
        }
    }

    #[test]
    fn test_valid_scope() {
        assert!(validate(all_good()).is_empty());
    }

    #[test]
    fn test_missing_references() {
        let errors = validate(MembershipScope { user_exists: false, ..all_good() });
        assert_eq!(errors.messages("user"), &[MUST_EXIST]);
        assert!(errors.messages("organization").is_empty());

        let errors = validate(MembershipScope { organization_exists: false, ..all_good() });
        assert_eq!(errors.messages("organization"), &[MUST_EXIST]);
    }

    #[test]
    fn test_duplicate_pair_errors_both_fields() {
        let errors = validate(MembershipScope { pair_taken: true, ..all_good() });
        assert_eq!(errors.messages("user"), &[TAKEN]);
        assert_eq!(errors.messages("organization"), &[TAKEN]);
    }
}
