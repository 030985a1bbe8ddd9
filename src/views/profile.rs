use tracing::warn;

use crate::claims::Claims;
use crate::models::User;
use crate::roles::Role;
use crate::services::UserService;

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: Option<User>,
    pub display_name: String,
    pub initials: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl Profile {
    /// The service record wins over token claims; the token is the fallback
    /// when the user service is unreachable.
    pub fn build(user: Option<User>, claims: Option<&Claims>) -> Self {
        let email = user
            .as_ref()
            .and_then(|u| u.email.clone())
            .or_else(|| claims.and_then(|c| c.email()).map(str::to_string));
        let display_name = user
            .as_ref()
            .and_then(|u| u.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| claims.and_then(|c| c.get("name")?.as_str().map(str::to_string)))
            .or_else(|| claims.and_then(|c| c.preferred_username()).map(str::to_string))
            .or_else(|| email.as_deref().and_then(|e| e.split('@').next()).map(str::to_string))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "User".to_string());
        let roles: Vec<Role> = claims.map(|c| c.roles().iter().collect()).unwrap_or_default();

        Self {
            initials: initials(&display_name),
            display_name,
            email,
            roles,
            user,
        }
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

pub async fn load_profile(users: &UserService, claims: Option<&Claims>) -> Profile {
    let user = match users.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Error loading user data: {}", e);
            None
        }
    };
    Profile::build(user, claims)
}
