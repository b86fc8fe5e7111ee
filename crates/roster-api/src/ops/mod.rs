//! Resource operations
//!
//! One method per handler action. Every protected operation resolves the
//! request identity first; being authenticated is the only gate — no
//! ownership filter is applied to organization, membership, or event
//! operations. Current-user operations act solely on the resolved identity.

mod events;
mod memberships;
mod organizations;
mod users;

pub use users::LoginParams;

use std::sync::Arc;

use roster_auth::{AuthConfig, Authenticator, TokenCodec};
use roster_store::Store;

/// The handler-facing facade over the store and the resolver.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use roster_api::Api;
/// use roster_auth::AuthConfig;
/// use roster_store::MemoryStore;
///
/// let api = Api::new(Arc::new(MemoryStore::new()), AuthConfig::new("service-secret"));
/// ```
pub struct Api {
    store: Arc<dyn Store>,
    authenticator: Authenticator,
}

impl Api {
    /// Build the facade from a store and an injected auth configuration.
    pub fn new(store: Arc<dyn Store>, config: AuthConfig) -> Self {
        let authenticator = Authenticator::new(TokenCodec::new(config), store.clone());
        Self {
            store,
            authenticator,
        }
    }

    /// The identity resolver, for embedders that authenticate outside of
    /// the operation methods.
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub(crate) fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }
}
