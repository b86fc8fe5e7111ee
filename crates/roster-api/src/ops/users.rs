//! Registration, login, and current-user operations
//!
//! Registration and login mint a fresh credential token. The current-user
//! operations act only on the identity resolved from the request; there is
//! no way to address another user's account through them.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use roster_auth::RequestAuth;
use roster_org::UserParams;

use crate::error::{ApiError, ApiResult};
use crate::respond::Reply;
use crate::views::{MembershipView, RegisteredUserView, UserView};

use super::Api;

/// Login credentials: a password plus an email or a username.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginParams {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Api {
    /// Register a new user. Replies 201 with the created account and a
    /// freshly minted token.
    pub async fn register(&self, params: UserParams) -> ApiResult<Reply> {
        let user = self.store().create_user(params).await?;
        let token = self.authenticator.codec().mint(user.id, Utc::now())?;
        Ok(Reply::created(
            json!({ "user": RegisteredUserView::new(&user, token) }),
        ))
    }

    /// Log a user in by email or username. A wrong login or password
    /// replies 401 with a flat error string that does not reveal which
    /// part was wrong.
    pub async fn login(&self, params: LoginParams) -> ApiResult<Reply> {
        let password = params.password.as_deref().unwrap_or_default();
        for login in [params.email.as_deref(), params.username.as_deref()]
            .into_iter()
            .flatten()
        {
            if let Some(user) = self.authenticator.verify_credentials(login, password).await? {
                let token = self.authenticator.codec().mint(user.id, Utc::now())?;
                return Ok(Reply::ok(json!({ "user": { "token": token } })));
            }
        }
        Err(ApiError::InvalidCredentials)
    }

    /// Show the authenticated user's own profile.
    pub async fn show_current_user(&self, request: &RequestAuth) -> ApiResult<Reply> {
        let user = request.current_user(&self.authenticator).await?;
        Ok(Reply::ok(json!({ "user": UserView::from(user) })))
    }

    /// Update the authenticated user's own profile.
    pub async fn update_current_user(
        &self,
        request: &RequestAuth,
        params: UserParams,
    ) -> ApiResult<Reply> {
        let user = request.current_user(&self.authenticator).await?;
        let updated = self.store().update_user(user.id, params).await?;
        Ok(Reply::ok(json!({ "user": UserView::from(&updated) })))
    }

    /// Delete the authenticated user's own account, cascading to its
    /// memberships.
    pub async fn delete_current_user(&self, request: &RequestAuth) -> ApiResult<Reply> {
        let user = request.current_user(&self.authenticator).await?.clone();
        let removed = self.store().delete_user(user.id).await?;
        if removed == 0 {
            warn!(user_id = %user.id, "account delete had no effect");
            return Err(ApiError::Destroy("Failed to delete account!".to_string()));
        }
        Ok(Reply::message(format!(
            "Successfully deleted user {} with email {}",
            user.username, user.email
        )))
    }

    /// List the authenticated user's own memberships.
    pub async fn current_user_memberships(&self, request: &RequestAuth) -> ApiResult<Reply> {
        let user = request.current_user(&self.authenticator).await?;
        let memberships = self.store().user_memberships(user.id).await?;
        let views: Vec<MembershipView> = memberships.iter().map(MembershipView::from).collect();
        Ok(Reply::ok(json!(views)))
    }
}
