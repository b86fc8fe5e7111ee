//! Event operations
//!
//! Events are always addressed under an organization path. For the
//! id-addressed operations, a missing organization and a missing (or
//! wrongly-scoped) event collapse to the same event-not-found at the
//! boundary; the index reports the organization itself instead.

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use roster_auth::RequestAuth;
use roster_org::EventParams;
use roster_store::{Resource, StoreError};

use crate::error::{ApiError, ApiResult, NotFoundError};
use crate::respond::Reply;
use crate::views::EventView;

use super::Api;

/// Reclassify a scoped-lookup failure so both the missing-organization and
/// missing-event cases surface as the addressed event not being found.
fn event_scope_error(error: StoreError, event_id: Uuid) -> ApiError {
    match error {
        StoreError::RecordNotFound {
            resource: Resource::Organization | Resource::Event,
            ..
        } => NotFoundError::Event(format!(
            "{}: Couldn't find event with id: {}",
            error.kind(),
            event_id
        ))
        .into(),
        other => other.into(),
    }
}

impl Api {
    /// List an organization's events.
    pub async fn list_events(&self, request: &RequestAuth, organization_id: Uuid) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let events = self.store().list_events(organization_id).await?;
        let views: Vec<EventView> = events.iter().map(EventView::from).collect();
        Ok(Reply::ok(json!(views)))
    }

    /// Create an event under an organization. The organization reference
    /// comes from the path scope and is validated with the attributes.
    pub async fn create_event(
        &self,
        request: &RequestAuth,
        organization_id: Uuid,
        params: EventParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let event = self.store().create_event(organization_id, params).await?;
        Ok(Reply::created(json!(EventView::from(&event))))
    }

    /// Show one event within its organization's scope.
    pub async fn show_event(
        &self,
        request: &RequestAuth,
        organization_id: Uuid,
        id: Uuid,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let event = self
            .store()
            .find_event(organization_id, id)
            .await
            .map_err(|e| event_scope_error(e, id))?;
        Ok(Reply::ok(json!(EventView::from(&event))))
    }

    /// Update an event within its organization's scope.
    pub async fn update_event(
        &self,
        request: &RequestAuth,
        organization_id: Uuid,
        id: Uuid,
        params: EventParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let event = self
            .store()
            .update_event(organization_id, id, params)
            .await
            .map_err(|e| event_scope_error(e, id))?;
        Ok(Reply::ok(json!(EventView::from(&event))))
    }

    /// Delete an event within its organization's scope.
    pub async fn delete_event(
        &self,
        request: &RequestAuth,
        organization_id: Uuid,
        id: Uuid,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let event = self
            .store()
            .find_event(organization_id, id)
            .await
            .map_err(|e| event_scope_error(e, id))?;
        let removed = self
            .store()
            .delete_event(organization_id, id)
            .await
            .map_err(|e| event_scope_error(e, id))?;
        if removed == 0 {
            warn!(event_id = %id, "event delete had no effect");
            return Err(ApiError::Destroy("Failed to delete event!".to_string()));
        }
        Ok(Reply::message(format!(
            "Successfully deleted event_id: {} for organization_id: {}",
            id, event.organization_id
        )))
    }
}
