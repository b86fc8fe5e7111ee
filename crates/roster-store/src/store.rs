//! The persistence trait consumed by the Roster core
//!
//! Implementations must validate every insert/update with the entity
//! validators from `roster-org`, enforce uniqueness at the persistence
//! boundary (two concurrent duplicate writes must not both succeed), and
//! make cascade deletes atomic with the parent row. Delete operations
//! return the number of rows removed, dependents included; `0` signals a
//! destroy that did not take effect.

use async_trait::async_trait;
use roster_org::{
    Event, EventParams, Membership, MembershipParams, Organization, OrganizationParams, User,
    UserParams,
};
use uuid::Uuid;

use crate::error::StoreResult;

/// Validated CRUD over the Organization–Membership–User–Event graph.
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Insert a user. The plaintext password in `params` is hashed before
    /// storage.
    async fn create_user(&self, params: UserParams) -> StoreResult<User>;

    /// Find a user by id.
    async fn find_user(&self, id: Uuid) -> StoreResult<User>;

    /// Find a user whose email or username matches `login`. Returns `None`
    /// rather than an error when nothing matches; absence here is a normal
    /// login outcome, not a lookup failure.
    async fn find_user_by_login(&self, login: &str) -> StoreResult<Option<User>>;

    /// Apply a partial update to a user.
    async fn update_user(&self, id: Uuid, params: UserParams) -> StoreResult<User>;

    /// Delete a user and its memberships. Returns rows removed.
    async fn delete_user(&self, id: Uuid) -> StoreResult<u64>;

    /// Memberships held by a user.
    async fn user_memberships(&self, user_id: Uuid) -> StoreResult<Vec<Membership>>;

    // Organizations

    /// Insert an organization.
    async fn create_organization(&self, params: OrganizationParams) -> StoreResult<Organization>;

    /// Find an organization by id.
    async fn find_organization(&self, id: Uuid) -> StoreResult<Organization>;

    /// Find an organization by exact name.
    async fn find_organization_by_name(&self, name: &str) -> StoreResult<Option<Organization>>;

    /// All organizations, in creation order.
    async fn list_organizations(&self) -> StoreResult<Vec<Organization>>;

    /// Apply a partial update to an organization.
    async fn update_organization(
        &self,
        id: Uuid,
        params: OrganizationParams,
    ) -> StoreResult<Organization>;

    /// Delete an organization together with its memberships and events.
    /// Returns rows removed.
    async fn delete_organization(&self, id: Uuid) -> StoreResult<u64>;

    /// Memberships belonging to an organization.
    async fn organization_memberships(&self, organization_id: Uuid)
        -> StoreResult<Vec<Membership>>;

    // Memberships

    /// Insert a membership.
    async fn create_membership(&self, params: MembershipParams) -> StoreResult<Membership>;

    /// Find a membership by id.
    async fn find_membership(&self, id: Uuid) -> StoreResult<Membership>;

    /// All memberships, in creation order.
    async fn list_memberships(&self) -> StoreResult<Vec<Membership>>;

    /// Apply a partial update to a membership.
    async fn update_membership(
        &self,
        id: Uuid,
        params: MembershipParams,
    ) -> StoreResult<Membership>;

    /// Delete a membership. Returns rows removed.
    async fn delete_membership(&self, id: Uuid) -> StoreResult<u64>;

    // Events (always addressed through their organization)

    /// Events hosted by an organization, in creation order.
    async fn list_events(&self, organization_id: Uuid) -> StoreResult<Vec<Event>>;

    /// Insert an event under an organization. The organization reference is
    /// validated as part of the attribute set.
    async fn create_event(&self, organization_id: Uuid, params: EventParams) -> StoreResult<Event>;

    /// Find an event within an organization's scope. An event that exists
    /// under a different organization is a not-found.
    async fn find_event(&self, organization_id: Uuid, id: Uuid) -> StoreResult<Event>;

    /// Apply a partial update to an event within an organization's scope.
    async fn update_event(
        &self,
        organization_id: Uuid,
        id: Uuid,
        params: EventParams,
    ) -> StoreResult<Event>;

    /// Delete an event within an organization's scope. Returns rows removed.
    async fn delete_event(&self, organization_id: Uuid, id: Uuid) -> StoreResult<u64>;
}
