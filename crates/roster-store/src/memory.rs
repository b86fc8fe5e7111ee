//! In-memory store implementation
//!
//! All four tables live behind a single `RwLock`; a write guard spans the
//! validate-and-mutate sequence, so cascade deletes are all-or-nothing and
//! two concurrent duplicate inserts cannot both pass the uniqueness scan.
//! Suitable for single-process deployments and testing; a SQL-backed
//! implementation would satisfy the same [`Store`] contract with real
//! indexes and transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use roster_org::{
    event, membership, organization, password, user, validate, Event, EventParams, EventScope,
    Membership, MembershipParams, MembershipScope, Organization, OrganizationParams,
    OrganizationScope, User, UserParams, UserScope, ValidationErrors,
};

use crate::error::{Resource, StoreError, StoreResult};
use crate::store::Store;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    organizations: HashMap<Uuid, Organization>,
    memberships: HashMap<Uuid, Membership>,
    events: HashMap<Uuid, Event>,
}

/// In-memory [`Store`] implementation.
///
/// # Examples
///
/// ```rust,no_run
/// use roster_store::{MemoryStore, Store};
/// use roster_org::UserParams;
///
/// # async fn example() -> Result<(), roster_store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store
///     .create_user(UserParams {
///         email: Some("ada@example.com".into()),
///         username: Some("ada".into()),
///         password: Some("lovelace1".into()),
///     })
///     .await?;
/// assert_eq!(store.find_user(user.id).await?.username, "ada");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn org_name_taken(tables: &Tables, name: &str, exclude: Option<Uuid>) -> bool {
        tables
            .organizations
            .values()
            .any(|o| Some(o.id) != exclude && o.name.eq_ignore_ascii_case(name))
    }

    fn pair_taken(tables: &Tables, user_id: Uuid, organization_id: Uuid, exclude: Option<Uuid>) -> bool {
        tables
            .memberships
            .values()
            .any(|m| Some(m.id) != exclude && m.user_id == user_id && m.organization_id == organization_id)
    }

    fn scoped_event(tables: &Tables, organization_id: Uuid, id: Uuid) -> StoreResult<Event> {
        if !tables.organizations.contains_key(&organization_id) {
            return Err(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id: organization_id,
            });
        }
        match tables.events.get(&id) {
            Some(event) if event.organization_id == organization_id => Ok(event.clone()),
            _ => Err(StoreError::RecordNotFound {
                resource: Resource::Event,
                id,
            }),
        }
    }

    // Mirrors the storage-level unique index on organizations.name.
    fn name_index_violation() -> StoreError {
        let mut errors = ValidationErrors::new();
        errors.add("name", validate::TAKEN);
        StoreError::RecordInvalid(errors)
    }

    // Mirrors the storage-level unique index on (user_id, organization_id).
    fn pair_index_violation() -> StoreError {
        let mut errors = ValidationErrors::new();
        errors.add("user", validate::TAKEN);
        errors.add("organization", validate::TAKEN);
        StoreError::RecordInvalid(errors)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, params: UserParams) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        let scope = UserScope {
            email_taken: params
                .email
                .as_deref()
                .is_some_and(|e| tables.users.values().any(|u| u.email == e)),
            username_taken: params
                .username
                .as_deref()
                .is_some_and(|n| tables.users.values().any(|u| u.username.eq_ignore_ascii_case(n))),
        };
        user::validate(
            params.email.as_deref(),
            params.username.as_deref(),
            params.password.as_deref(),
            true,
            scope,
        )
        .into_result()
        .map_err(StoreError::RecordInvalid)?;

        let digest = password::hash(params.password.as_deref().unwrap_or_default());
        let user = User::new(
            params.email.unwrap_or_default(),
            params.username.unwrap_or_default(),
            digest,
        );
        tables.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "created user");
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables.users.get(&id).cloned().ok_or(StoreError::RecordNotFound {
            resource: Resource::User,
            id,
        })
    }

    async fn find_user_by_login(&self, login: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email == login || u.username.eq_ignore_ascii_case(login))
            .cloned())
    }

    async fn update_user(&self, id: Uuid, params: UserParams) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        let current = tables.users.get(&id).cloned().ok_or(StoreError::RecordNotFound {
            resource: Resource::User,
            id,
        })?;
        let email = params.email.clone().unwrap_or_else(|| current.email.clone());
        let username = params
            .username
            .clone()
            .unwrap_or_else(|| current.username.clone());
        // An absent or blank password leaves the credential unchanged.
        let password = params.password.as_deref().filter(|p| !p.trim().is_empty());

        let scope = UserScope {
            email_taken: tables.users.values().any(|u| u.id != id && u.email == email),
            username_taken: tables
                .users
                .values()
                .any(|u| u.id != id && u.username.eq_ignore_ascii_case(&username)),
        };
        user::validate(Some(&email), Some(&username), password, false, scope)
            .into_result()
            .map_err(StoreError::RecordInvalid)?;

        let digest = password.map(password::hash);
        let user = tables.users.get_mut(&id).ok_or(StoreError::RecordNotFound {
            resource: Resource::User,
            id,
        })?;
        user.email = email;
        user.username = username;
        if let Some(digest) = digest {
            user.password_digest = digest;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;

        if tables.users.remove(&id).is_none() {
            return Err(StoreError::RecordNotFound {
                resource: Resource::User,
                id,
            });
        }
        let before = tables.memberships.len();
        tables.memberships.retain(|_, m| m.user_id != id);
        let removed = 1 + (before - tables.memberships.len()) as u64;
        debug!(user_id = %id, rows = removed, "deleted user");
        Ok(removed)
    }

    async fn user_memberships(&self, user_id: Uuid) -> StoreResult<Vec<Membership>> {
        let tables = self.tables.read().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::RecordNotFound {
                resource: Resource::User,
                id: user_id,
            });
        }
        let mut memberships: Vec<Membership> = tables
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        memberships.sort_by_key(|m| m.id);
        Ok(memberships)
    }

    async fn create_organization(&self, params: OrganizationParams) -> StoreResult<Organization> {
        let mut tables = self.tables.write().await;

        let scope = OrganizationScope {
            name_taken: params
                .name
                .as_deref()
                .is_some_and(|n| Self::org_name_taken(&tables, n, None)),
        };
        organization::validate(
            params.name.as_deref(),
            params.total_members,
            params.description.as_deref(),
            scope,
        )
        .into_result()
        .map_err(StoreError::RecordInvalid)?;

        let name = params.name.unwrap_or_default();
        if Self::org_name_taken(&tables, &name, None) {
            return Err(Self::name_index_violation());
        }

        let organization = Organization::new(
            name,
            params.total_members.unwrap_or_default(),
            params.description.unwrap_or_default(),
        );
        tables.organizations.insert(organization.id, organization.clone());
        debug!(organization_id = %organization.id, "created organization");
        Ok(organization)
    }

    async fn find_organization(&self, id: Uuid) -> StoreResult<Organization> {
        let tables = self.tables.read().await;
        tables
            .organizations
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id,
            })
    }

    async fn find_organization_by_name(&self, name: &str) -> StoreResult<Option<Organization>> {
        let tables = self.tables.read().await;
        Ok(tables
            .organizations
            .values()
            .find(|o| o.name == name)
            .cloned())
    }

    async fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let tables = self.tables.read().await;
        let mut organizations: Vec<Organization> =
            tables.organizations.values().cloned().collect();
        organizations.sort_by_key(|o| o.id);
        Ok(organizations)
    }

    async fn update_organization(
        &self,
        id: Uuid,
        params: OrganizationParams,
    ) -> StoreResult<Organization> {
        let mut tables = self.tables.write().await;

        let current = tables
            .organizations
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id,
            })?;
        let name = params.name.clone().unwrap_or_else(|| current.name.clone());
        let total_members = params.total_members.or(Some(current.total_members));
        let description = params
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone());

        let scope = OrganizationScope {
            name_taken: Self::org_name_taken(&tables, &name, Some(id)),
        };
        organization::validate(Some(&name), total_members, Some(&description), scope)
            .into_result()
            .map_err(StoreError::RecordInvalid)?;

        if Self::org_name_taken(&tables, &name, Some(id)) {
            return Err(Self::name_index_violation());
        }

        let organization = tables
            .organizations
            .get_mut(&id)
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id,
            })?;
        organization.name = name;
        organization.total_members = total_members.unwrap_or(organization.total_members);
        organization.description = description;
        organization.updated_at = Utc::now();
        Ok(organization.clone())
    }

    async fn delete_organization(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;

        if tables.organizations.remove(&id).is_none() {
            return Err(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id,
            });
        }
        let memberships_before = tables.memberships.len();
        tables.memberships.retain(|_, m| m.organization_id != id);
        let events_before = tables.events.len();
        tables.events.retain(|_, e| e.organization_id != id);

        let removed = 1
            + (memberships_before - tables.memberships.len()) as u64
            + (events_before - tables.events.len()) as u64;
        debug!(organization_id = %id, rows = removed, "deleted organization");
        Ok(removed)
    }

    async fn organization_memberships(
        &self,
        organization_id: Uuid,
    ) -> StoreResult<Vec<Membership>> {
        let tables = self.tables.read().await;
        if !tables.organizations.contains_key(&organization_id) {
            return Err(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id: organization_id,
            });
        }
        let mut memberships: Vec<Membership> = tables
            .memberships
            .values()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect();
        memberships.sort_by_key(|m| m.id);
        Ok(memberships)
    }

    async fn create_membership(&self, params: MembershipParams) -> StoreResult<Membership> {
        let mut tables = self.tables.write().await;

        let scope = MembershipScope {
            user_exists: params
                .user_id
                .is_some_and(|u| tables.users.contains_key(&u)),
            organization_exists: params
                .organization_id
                .is_some_and(|o| tables.organizations.contains_key(&o)),
            pair_taken: match (params.user_id, params.organization_id) {
                (Some(u), Some(o)) => Self::pair_taken(&tables, u, o, None),
                _ => false,
            },
        };
        membership::validate(scope)
            .into_result()
            .map_err(StoreError::RecordInvalid)?;

        let user_id = params.user_id.unwrap_or_default();
        let organization_id = params.organization_id.unwrap_or_default();
        if Self::pair_taken(&tables, user_id, organization_id, None) {
            return Err(Self::pair_index_violation());
        }

        let membership = Membership::new(user_id, organization_id);
        tables.memberships.insert(membership.id, membership.clone());
        debug!(membership_id = %membership.id, "created membership");
        Ok(membership)
    }

    async fn find_membership(&self, id: Uuid) -> StoreResult<Membership> {
        let tables = self.tables.read().await;
        tables
            .memberships
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Membership,
                id,
            })
    }

    async fn list_memberships(&self) -> StoreResult<Vec<Membership>> {
        let tables = self.tables.read().await;
        let mut memberships: Vec<Membership> = tables.memberships.values().cloned().collect();
        memberships.sort_by_key(|m| m.id);
        Ok(memberships)
    }

    async fn update_membership(
        &self,
        id: Uuid,
        params: MembershipParams,
    ) -> StoreResult<Membership> {
        let mut tables = self.tables.write().await;

        let current = tables
            .memberships
            .get(&id)
            .cloned()
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Membership,
                id,
            })?;
        let user_id = params.user_id.unwrap_or(current.user_id);
        let organization_id = params.organization_id.unwrap_or(current.organization_id);

        let scope = MembershipScope {
            user_exists: tables.users.contains_key(&user_id),
            organization_exists: tables.organizations.contains_key(&organization_id),
            pair_taken: Self::pair_taken(&tables, user_id, organization_id, Some(id)),
        };
        membership::validate(scope)
            .into_result()
            .map_err(StoreError::RecordInvalid)?;

        if Self::pair_taken(&tables, user_id, organization_id, Some(id)) {
            return Err(Self::pair_index_violation());
        }

        let membership = tables
            .memberships
            .get_mut(&id)
            .ok_or(StoreError::RecordNotFound {
                resource: Resource::Membership,
                id,
            })?;
        membership.user_id = user_id;
        membership.organization_id = organization_id;
        membership.updated_at = Utc::now();
        Ok(membership.clone())
    }

    async fn delete_membership(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if tables.memberships.remove(&id).is_none() {
            return Err(StoreError::RecordNotFound {
                resource: Resource::Membership,
                id,
            });
        }
        debug!(membership_id = %id, "deleted membership");
        Ok(1)
    }

    async fn list_events(&self, organization_id: Uuid) -> StoreResult<Vec<Event>> {
        let tables = self.tables.read().await;
        if !tables.organizations.contains_key(&organization_id) {
            return Err(StoreError::RecordNotFound {
                resource: Resource::Organization,
                id: organization_id,
            });
        }
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| e.organization_id == organization_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    async fn create_event(&self, organization_id: Uuid, params: EventParams) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;

        let scope = EventScope {
            organization_exists: tables.organizations.contains_key(&organization_id),
        };
        event::validate(
            params.name.as_deref(),
            params.description.as_deref(),
            params.start_time,
            params.end_time,
            scope,
        )
        .into_result()
        .map_err(StoreError::RecordInvalid)?;

        let event = Event::new(
            organization_id,
            params.name.unwrap_or_default(),
            params.description.unwrap_or_default(),
            params.start_time.unwrap_or_default(),
            params.end_time.unwrap_or_default(),
        );
        tables.events.insert(event.id, event.clone());
        debug!(event_id = %event.id, organization_id = %organization_id, "created event");
        Ok(event)
    }

    async fn find_event(&self, organization_id: Uuid, id: Uuid) -> StoreResult<Event> {
        let tables = self.tables.read().await;
        Self::scoped_event(&tables, organization_id, id)
    }

    async fn update_event(
        &self,
        organization_id: Uuid,
        id: Uuid,
        params: EventParams,
    ) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;

        let current = Self::scoped_event(&tables, organization_id, id)?;
        let name = params.name.clone().unwrap_or_else(|| current.name.clone());
        let description = params
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone());
        let start_time = params.start_time.unwrap_or(current.start_time);
        let end_time = params.end_time.unwrap_or(current.end_time);

        event::validate(
            Some(&name),
            Some(&description),
            Some(start_time),
            Some(end_time),
            EventScope {
                organization_exists: true,
            },
        )
        .into_result()
        .map_err(StoreError::RecordInvalid)?;

        let event = tables.events.get_mut(&id).ok_or(StoreError::RecordNotFound {
            resource: Resource::Event,
            id,
        })?;
        event.name = name;
        event.description = description;
        event.start_time = start_time;
        event.end_time = end_time;
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn delete_event(&self, organization_id: Uuid, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        Self::scoped_event(&tables, organization_id, id)?;
        tables.events.remove(&id);
        debug!(event_id = %id, "deleted event");
        Ok(1)
    }
}
