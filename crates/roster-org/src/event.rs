//! Event domain model
//!
//! Events are hosted by organizations and only ever addressed through their
//! organization: a lookup under the wrong organization is a not-found even
//! when the event exists elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationErrors};

/// An organization-hosted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: Uuid,

    /// Hosting organization
    pub organization_id: Uuid,

    /// Event name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// When the event starts
    pub start_time: DateTime<Utc>,

    /// When the event ends
    pub end_time: DateTime<Utc>,

    /// When the event was created
    pub created_at: DateTime<Utc>,

    /// When the event was last updated
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event with a generated UUID v7 id and current
    /// timestamps.
    pub fn new(
        organization_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            organization_id,
            name: name.into(),
            description: description.into(),
            start_time,
            end_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert/update attributes for an event. The hosting organization comes
/// from the path scope, never from the attribute set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventParams {
    /// Event name
    pub name: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// When the event starts
    pub start_time: Option<DateTime<Utc>>,

    /// When the event ends
    pub end_time: Option<DateTime<Utc>>,
}

/// Existence probes computed by the persistence layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventScope {
    /// The hosting organization row exists
    pub organization_exists: bool,
}

/// Validate candidate event attributes. Returns the field→messages map;
/// empty means valid.
pub fn validate(
    name: Option<&str>,
    description: Option<&str>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    scope: EventScope,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !scope.organization_exists {
        errors.add("organization", validate::MUST_EXIST);
    }
    if !validate::present(name) {
        errors.add("name", validate::BLANK);
    }
    if !validate::present(description) {
        errors.add("description", validate::BLANK);
    }
    if start_time.is_none() {
        errors.add("start_time", validate::BLANK);
    }
    if end_time.is_none() {
        errors.add("end_time", validate::BLANK);
    }

    errors
}
