/**
 * Account Handler Types
 *
 * Request and response types for the `/users` endpoints. Requests are
 * validated with `validate()` before any store access; responses never carry
 * the password hash.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::require_text;
use crate::shared::models::{Role, User};
use crate::shared::SharedError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Plain text; hashed before storage
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("username", &self.username)?;
        require_text("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "email must be a valid address."));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("password must be at least {} characters.", MIN_PASSWORD_LEN),
            ));
        }
        Ok(())
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile update; absent fields are left unchanged
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(username) = &self.username {
            require_text("username", username)?;
        }
        if let Some(email) = &self.email {
            require_text("email", email)?;
            if !email.contains('@') {
                return Err(SharedError::validation("email", "email must be a valid address."));
            }
        }
        Ok(())
    }
}

/// Returned by login
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Identity block of the login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// A user document without its password hash
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub boards: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
            boards: user.boards.iter().map(|id| id.to_string()).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `PUT /users/profile` response
#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "password123".into(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest { password: "short".into(), ..ok };
        let err = short.validate().unwrap_err();
        assert!(matches!(err, SharedError::ValidationError { ref field, .. } if field == "password"));
    }

    #[test]
    fn test_user_response_omits_hash() {
        let user = User::new("alice", "Alice@Example.com", "$2b$secret".into());
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("$2b$secret"));
    }
}
