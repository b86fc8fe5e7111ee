//! Organization operations
//!
//! Any authenticated identity may read or write any organization; the
//! index supports an optional exact-name query that yields a zero- or
//! one-element list.

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use roster_auth::RequestAuth;
use roster_org::OrganizationParams;

use crate::error::{ApiError, ApiResult};
use crate::respond::Reply;
use crate::views::{MembershipView, OrganizationView};

use super::Api;

impl Api {
    /// List organizations, optionally filtered to an exact name.
    pub async fn list_organizations(
        &self,
        request: &RequestAuth,
        name: Option<&str>,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;

        let organizations = match name {
            Some(name) => self
                .store()
                .find_organization_by_name(name)
                .await?
                .into_iter()
                .collect(),
            None => self.store().list_organizations().await?,
        };
        let views: Vec<OrganizationView> =
            organizations.iter().map(OrganizationView::from).collect();
        Ok(Reply::ok(json!(views)))
    }

    /// Create an organization.
    pub async fn create_organization(
        &self,
        request: &RequestAuth,
        params: OrganizationParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let organization = self.store().create_organization(params).await?;
        Ok(Reply::created(json!(OrganizationView::from(&organization))))
    }

    /// Show one organization.
    pub async fn show_organization(&self, request: &RequestAuth, id: Uuid) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let organization = self.store().find_organization(id).await?;
        Ok(Reply::ok(json!(OrganizationView::from(&organization))))
    }

    /// Update an organization.
    pub async fn update_organization(
        &self,
        request: &RequestAuth,
        id: Uuid,
        params: OrganizationParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let organization = self.store().update_organization(id, params).await?;
        Ok(Reply::ok(json!(OrganizationView::from(&organization))))
    }

    /// Delete an organization together with its memberships and events.
    pub async fn delete_organization(&self, request: &RequestAuth, id: Uuid) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let organization = self.store().find_organization(id).await?;
        let removed = self.store().delete_organization(id).await?;
        if removed == 0 {
            warn!(organization_id = %id, "organization delete had no effect");
            return Err(ApiError::Destroy(
                "Failed to delete organization!".to_string(),
            ));
        }
        Ok(Reply::message(format!(
            "Successfully deleted organization {}",
            organization.name
        )))
    }

    /// List an organization's memberships.
    pub async fn organization_memberships(
        &self,
        request: &RequestAuth,
        id: Uuid,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let memberships = self.store().organization_memberships(id).await?;
        let views: Vec<MembershipView> = memberships.iter().map(MembershipView::from).collect();
        Ok(Reply::ok(json!(views)))
    }
}
