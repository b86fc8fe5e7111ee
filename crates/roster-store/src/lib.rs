//! # Roster Persistence
//!
//! This crate provides the persistence collaborator consumed by the Roster
//! core: a [`Store`] trait describing validated CRUD over the four domain
//! entities, and an in-memory implementation suitable for single-process
//! deployments and testing.
//!
//! ## Overview
//!
//! The roster-store crate handles:
//! - **Lookups**: find-by-id that fails distinctly when the row is absent
//! - **Validated writes**: insert/update gated on the entity validators,
//!   reported as field-keyed message maps
//! - **Uniqueness**: organization names and (user, organization) membership
//!   pairs enforced at the persistence boundary
//! - **Cascade delete**: removing a user or organization removes its
//!   dependents in the same atomic step, with a deleted-row count usable to
//!   detect a destroy that did not take effect
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roster_store::{MemoryStore, Store};
//! use roster_org::OrganizationParams;
//!
//! # async fn example() -> Result<(), roster_store::StoreError> {
//! let store = MemoryStore::new();
//! let org = store
//!     .create_organization(OrganizationParams {
//!         name: Some("Acme Corp".into()),
//!         total_members: Some(12),
//!         description: Some("Makers of everything".into()),
//!     })
//!     .await?;
//! let found = store.find_organization(org.id).await?;
//! assert_eq!(found.name, "Acme Corp");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod store;

// Re-export main types
pub use error::{Resource, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::Store;
