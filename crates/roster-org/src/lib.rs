//! # Roster Domain Model
//!
//! This crate provides the domain entities for the Roster membership
//! platform, shared across the store, auth, and API crates.
//!
//! ## Overview
//!
//! The roster-org crate handles:
//! - **Users**: Registered accounts with credential digests
//! - **Organizations**: Top-level tenant entities hosting events
//! - **Memberships**: User-organization relationships
//! - **Events**: Organization-scoped happenings
//! - **Validation**: Per-entity validation functions returning field-keyed
//!   message maps
//!
//! ## Architecture
//!
//! ```text
//! User
//!   └─ Membership ─→ Organization
//!                       └─ Event
//! ```
//!
//! Deleting a user removes its memberships; deleting an organization removes
//! its memberships and events. The (user, organization) membership pair is
//! unique in both projections.
//!
//! ## Validation
//!
//! Each entity module exposes a `validate` function that is invoked by the
//! persistence layer before every insert and update. Uniqueness and
//! existence probes are computed by the caller (which owns the data) and
//! passed in as a scope value, so the functions themselves stay pure:
//!
//! ```
//! use roster_org::organization::{self, OrganizationScope};
//!
//! let errors = organization::validate(
//!     Some("Acme Corp"),
//!     Some(12),
//!     Some("Makers of everything"),
//!     OrganizationScope { name_taken: false },
//! );
//! assert!(errors.is_empty());
//! ```

pub mod event;
pub mod membership;
pub mod organization;
pub mod password;
pub mod user;
pub mod validate;

// Re-export main types for convenience
pub use event::{Event, EventParams, EventScope};
pub use membership::{Membership, MembershipParams, MembershipScope};
pub use organization::{Organization, OrganizationParams, OrganizationScope};
pub use user::{User, UserParams, UserScope};
pub use validate::ValidationErrors;
