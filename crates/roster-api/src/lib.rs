//! # Roster API Surface
//!
//! This crate provides the handler-facing core of the Roster membership
//! platform: per-operation methods over the persistence collaborator,
//! gated by the identity resolver, with every failure funneled through a
//! single responder that owns the wire error contract.
//!
//! ## Overview
//!
//! The roster-api crate handles:
//! - **Operations**: registration, login, current-user actions, and CRUD
//!   over organizations, memberships, and organization-scoped events
//! - **Access guard**: every protected operation requires a resolved
//!   identity; none applies an ownership filter beyond that
//! - **Error taxonomy**: authentication (401), not-found (404), validation
//!   (400), and destroy failures (400), each with its own envelope shape
//! - **Views**: lower-camel-cased wire representations of the entities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roster_api::{render_error, Api};
//! use roster_auth::{AuthConfig, RequestAuth};
//! use roster_store::MemoryStore;
//!
//! # async fn example(header: Option<&str>) {
//! let api = Api::new(Arc::new(MemoryStore::new()), AuthConfig::new("service-secret"));
//! let request = RequestAuth::new(header);
//!
//! let reply = match api.list_organizations(&request, None).await {
//!     Ok(reply) => reply,
//!     Err(error) => render_error(&error),
//! };
//! assert!(reply.status == 200 || reply.status == 401);
//! # }
//! ```

pub mod error;
pub mod ops;
pub mod respond;
pub mod views;

// Re-export main types
pub use error::{ApiError, ApiResult, NotFoundError};
pub use ops::{Api, LoginParams};
pub use respond::{render_error, Reply};
