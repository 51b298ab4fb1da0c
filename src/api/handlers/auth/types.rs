//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::identity::UserView;

#[derive(ToSchema, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Success payload for register, login and check.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserView,
}

impl AuthResponse {
    pub(super) fn new(message: &str, user: UserView) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use anyhow::Result;
    use uuid::Uuid;

    #[test]
    fn register_request_debug_redacts_password() -> Result<()> {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "password": "hunter2",
            "name": "Ann",
        }))?;
        let debug = format!("{request:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
        Ok(())
    }

    #[test]
    fn auth_response_shape() -> Result<()> {
        let user = UserView {
            id: Uuid::nil(),
            email: "a@x.com".to_string(),
            name: "Ann".to_string(),
            role: Role::User,
            image: Some("https://cdn.example.com/ann.png".to_string()),
        };
        let value = serde_json::to_value(AuthResponse::new("ok", user))?;
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "ok");
        assert_eq!(value["user"]["image"], "https://cdn.example.com/ann.png");
        assert_eq!(value["user"]["role"], "USER");
        Ok(())
    }
}
