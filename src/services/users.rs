use serde_json::json;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{
    ApprovalResponse, PendingApprovals, RejectionResponse, RoleInfo, RoleList, SignupRequest,
    SignupResponse, User, UserEnvelope, UserList,
};
use crate::roles::Role;

/// User service: accounts, roles and the florist approval workflow.
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.get("/users/me").await?;
        Ok(envelope.user)
    }

    /// Admin only.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let list: UserList = self.client.get("/users").await?;
        Ok(list.users)
    }

    pub async fn user(&self, user_id: i64) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.get(&format!("/users/{user_id}")).await?;
        Ok(envelope.user)
    }

    /// Creates or refreshes the local record for the logged-in identity.
    pub async fn sync_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.post_empty("/users/sync").await?;
        Ok(envelope.user)
    }

    pub async fn update_user_role(&self, user_id: i64, role: Role) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .client
            .put(&format!("/users/{user_id}/role"), &json!({ "role": role }))
            .await?;
        Ok(envelope.user)
    }

    pub async fn roles(&self) -> Result<Vec<RoleInfo>, ApiError> {
        let list: RoleList = self.client.get("/roles").await?;
        Ok(list.roles)
    }

    /// Public endpoint; a florist request comes back with `pending_approval`.
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.client.post("/users/signup", request).await
    }

    /// Registers the already-authenticated identity, optionally asking for
    /// the florist role.
    pub async fn register_with_role(
        &self,
        requested_role: Role,
    ) -> Result<SignupResponse, ApiError> {
        self.client
            .post("/users/register", &json!({ "requested_role": requested_role }))
            .await
    }

    pub async fn pending_approvals(&self) -> Result<Vec<User>, ApiError> {
        let pending: PendingApprovals = self.client.get("/users/pending-approvals").await?;
        Ok(pending.pending_users)
    }

    pub async fn approve_florar(&self, user_id: i64) -> Result<ApprovalResponse, ApiError> {
        self.client
            .post_empty(&format!("/users/{user_id}/approve"))
            .await
    }

    /// A blank reason lets the service fill in its default.
    pub async fn reject_florar(
        &self,
        user_id: i64,
        reason: Option<&str>,
    ) -> Result<RejectionResponse, ApiError> {
        let body = match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        self.client
            .post(&format!("/users/{user_id}/reject"), &body)
            .await
    }
}
