use crate::error::ApiError;
use crate::models::User;
use crate::services::UserService;

/// Admin queue of florist requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalQueue {
    pub pending: Vec<User>,
}

impl ApprovalQueue {
    pub async fn load(users: &UserService) -> Result<Self, ApiError> {
        Ok(Self { pending: users.pending_approvals().await? })
    }

    fn take(&mut self, user_id: i64) -> Option<User> {
        let index = self.pending.iter().position(|u| u.id == user_id)?;
        Some(self.pending.remove(index))
    }

    pub async fn approve(&mut self, users: &UserService, user_id: i64) -> Result<String, ApiError> {
        let response = users.approve_florar(user_id).await?;
        let label = self
            .take(user_id)
            .or(response.user)
            .map(|u| u.email.clone().unwrap_or_else(|| u.label()))
            .unwrap_or_else(|| format!("User #{user_id}"));
        Ok(approval_message(&label, response.keycloak_updated))
    }

    pub async fn reject(
        &mut self,
        users: &UserService,
        user_id: i64,
        reason: Option<&str>,
    ) -> Result<String, ApiError> {
        users.reject_florar(user_id, reason).await?;
        self.take(user_id);
        Ok("Request rejected successfully".to_string())
    }
}

pub fn approval_message(who: &str, role_updated: bool) -> String {
    let status = if role_updated {
        "Keycloak role updated"
    } else {
        "Keycloak role update failed"
    };
    format!("{who} has been approved as a florist!\n{status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_reflects_role_sync() {
        assert_eq!(
            approval_message("ana@example.com", true),
            "ana@example.com has been approved as a florist!\nKeycloak role updated"
        );
        assert!(approval_message("x", false).ends_with("\nKeycloak role update failed"));
    }

    #[test]
    fn take_removes_only_that_user() {
        let user = |id| serde_json::from_value::<User>(serde_json::json!({"id": id})).unwrap();
        let mut queue = ApprovalQueue { pending: vec![user(1), user(2), user(3)] };
        assert_eq!(queue.take(2).map(|u| u.id), Some(2));
        assert!(queue.take(9).is_none());
        let ids: Vec<i64> = queue.pending.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
