//! Account creation and role registration.

use crate::error::{FormError, ViewError};
use crate::models::{SignupRequest, SignupResponse};
use crate::roles::Role;
use crate::services::UserService;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
    pub requested_role: Role,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, FormError> {
        if self.password != self.confirm_password {
            return Err(FormError::new("Passwords do not match"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::new("Password must be at least 6 characters"));
        }
        if self.requested_role == Role::Admin {
            return Err(FormError::new("Requested role must be client or florar"));
        }
        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            requested_role: self.requested_role.to_string(),
        })
    }
}

pub fn signup_message(response: &SignupResponse) -> &'static str {
    if response.pending_approval {
        "Account created! Your florist request is pending admin approval. \
         You can login as a client for now."
    } else {
        "Account created successfully! Redirecting to login..."
    }
}

pub async fn submit_signup(
    users: &UserService,
    form: &SignupForm,
) -> Result<&'static str, ViewError> {
    let request = form.validate()?;
    let response = users.signup(&request).await?;
    Ok(signup_message(&response))
}

/// Registers the logged-in identity. Being registered already counts as
/// success.
pub async fn register(
    users: &UserService,
    requested_role: Role,
) -> Result<&'static str, ViewError> {
    match users.register_with_role(requested_role).await {
        Ok(response) if response.pending_approval => Ok(
            "Your florar account request has been submitted and is pending admin approval. \
             You will be notified once approved.",
        ),
        Ok(_) => Ok("Registration successful! Redirecting to dashboard..."),
        Err(e) if e.to_string().contains("already registered") => {
            Ok("You are already registered. Redirecting to dashboard...")
        }
        Err(e) => Err(e.into()),
    }
}
