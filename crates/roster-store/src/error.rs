//! Error types for persistence operations
//!
//! Failures are a closed set: a row can be missing, a write can fail
//! validation, or the backend itself can fail. Callers reclassify these into
//! the API error taxonomy, embedding [`StoreError::kind`] as a diagnostic
//! prefix in the process.

use roster_org::ValidationErrors;
use thiserror::Error;
use uuid::Uuid;

/// The entity a store operation was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A user row
    User,
    /// An organization row
    Organization,
    /// A membership row
    Membership,
    /// An event row
    Event,
}

impl Resource {
    /// Lowercase resource name as it appears in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Organization => "organization",
            Resource::Membership => "membership",
            Resource::Event => "event",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with the given id (or none within the addressed scope).
    #[error("Couldn't find {resource} with id: {id}")]
    RecordNotFound {
        /// Entity that was being looked up
        resource: Resource,
        /// The id that had no row
        id: Uuid,
    },

    /// A write failed validation; carries the field-keyed messages.
    #[error("{0}")]
    RecordInvalid(ValidationErrors),

    /// The storage backend itself failed.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Short kind name, embedded as a diagnostic prefix when this error is
    /// reclassified at an API boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::RecordNotFound { .. } => "RecordNotFound",
            StoreError::RecordInvalid(_) => "RecordInvalid",
            StoreError::Backend(_) => "Backend",
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = StoreError::RecordNotFound {
            resource: Resource::Organization,
            id,
        };
        assert_eq!(
            err.to_string(),
            format!("Couldn't find organization with id: {id}")
        );
        assert_eq!(err.kind(), "RecordNotFound");
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::User.as_str(), "user");
        assert_eq!(Resource::Event.to_string(), "event");
    }
}
