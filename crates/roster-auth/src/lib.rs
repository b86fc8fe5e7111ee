//! # Roster Authentication
//!
//! This crate provides stateless credential-token authentication for the
//! Roster membership platform.
//!
//! ## Overview
//!
//! The roster-auth crate handles:
//! - **Token codec**: minting and verifying signed, time-bounded identity
//!   tokens (HS256, 60-day default lifetime)
//! - **Identity resolution**: turning a raw Authorization header into an
//!   authenticated user, with failures classified into a closed taxonomy
//! - **Request caching**: memoizing the resolved identity for one request
//!   lifecycle
//! - **Credential matching**: login verification against stored digests
//!
//! Tokens are never stored server-side and carry no revocation list;
//! validity is purely signature plus expiry.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use roster_auth::{AuthConfig, Authenticator, RequestAuth, TokenCodec};
//! use roster_store::MemoryStore;
//!
//! # async fn example(user_id: uuid::Uuid) -> roster_auth::AuthResult<()> {
//! let codec = TokenCodec::new(AuthConfig::new("service-secret"));
//! let token = codec.mint(user_id, Utc::now())?;
//!
//! let authenticator = Authenticator::new(codec, Arc::new(MemoryStore::new()));
//! let header = format!("Token {token}");
//! let request = RequestAuth::new(Some(header.as_str()));
//! let _identity = request.current_user(&authenticator).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod resolver;
pub mod token;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use resolver::{Authenticator, RequestAuth};
pub use token::{AccessClaims, AuthConfig, DecodeError, TokenCodec};
