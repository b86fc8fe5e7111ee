//! Wire-facing resource views
//!
//! JSON field names are lower-camel-cased on the wire regardless of the
//! storage layer's naming, and credential material never appears in any
//! view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use roster_org::{Event, Membership, Organization, User};

/// A user as rendered for the account holder.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// A freshly registered user, including the minted credential token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub token: String,
}

impl RegisteredUserView {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationView {
    pub id: Uuid,
    pub name: String,
    pub total_members: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Organization> for OrganizationView {
    fn from(organization: &Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name.clone(),
            total_members: organization.total_members,
            description: organization.description.clone(),
            created_at: organization.created_at,
            updated_at: organization.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Membership> for MembershipView {
    fn from(membership: &Membership) -> Self {
        Self {
            id: membership.id,
            user_id: membership.user_id,
            organization_id: membership.organization_id,
            created_at: membership.created_at,
            updated_at: membership.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            organization_id: event.organization_id,
            name: event.name.clone(),
            description: event.description.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_org::password;

    #[test]
    fn test_field_names_are_camel_cased_and_credentials_stay_out() {
        let user = User::new("ada@example.com", "ada", password::hash("lovelace1"));
        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("createdAt"));
        assert!(!object.contains_key("created_at"));
        assert!(!object.contains_key("passwordDigest"));
    }

    #[test]
    fn test_membership_view_references() {
        let membership = Membership::new(Uuid::now_v7(), Uuid::now_v7());
        let value = serde_json::to_value(MembershipView::from(&membership)).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("userId"));
        assert!(object.contains_key("organizationId"));
    }
}
