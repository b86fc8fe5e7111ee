//! Membership operations
//!
//! Memberships are addressed flat (not under an organization path); the
//! bidirectional (user, organization) uniqueness is enforced by the store
//! and surfaces as a validation failure on both fields.

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use roster_auth::RequestAuth;
use roster_org::MembershipParams;

use crate::error::{ApiError, ApiResult};
use crate::respond::Reply;
use crate::views::MembershipView;

use super::Api;

impl Api {
    /// List all memberships.
    pub async fn list_memberships(&self, request: &RequestAuth) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let memberships = self.store().list_memberships().await?;
        let views: Vec<MembershipView> = memberships.iter().map(MembershipView::from).collect();
        Ok(Reply::ok(json!(views)))
    }

    /// Create a membership.
    pub async fn create_membership(
        &self,
        request: &RequestAuth,
        params: MembershipParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let membership = self.store().create_membership(params).await?;
        Ok(Reply::created(json!(MembershipView::from(&membership))))
    }

    /// Show one membership.
    pub async fn show_membership(&self, request: &RequestAuth, id: Uuid) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let membership = self.store().find_membership(id).await?;
        Ok(Reply::ok(json!(MembershipView::from(&membership))))
    }

    /// Update a membership.
    pub async fn update_membership(
        &self,
        request: &RequestAuth,
        id: Uuid,
        params: MembershipParams,
    ) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let membership = self.store().update_membership(id, params).await?;
        Ok(Reply::ok(json!(MembershipView::from(&membership))))
    }

    /// Delete a membership.
    pub async fn delete_membership(&self, request: &RequestAuth, id: Uuid) -> ApiResult<Reply> {
        request.current_user(&self.authenticator).await?;
        let membership = self.store().find_membership(id).await?;
        let removed = self.store().delete_membership(id).await?;
        if removed == 0 {
            warn!(membership_id = %id, "membership delete had no effect");
            return Err(ApiError::Destroy("Failed to delete membership!".to_string()));
        }
        Ok(Reply::message(format!(
            "Successfully deleted membership with user_id: {}, organization_id: {}",
            membership.user_id, membership.organization_id
        )))
    }
}
