/**
 * User Model
 *
 * A registered account. `boards` lists every board the user created or was
 * added to as a member. The bcrypt hash is stored on the document but never
 * leaves the server; responses use `UserResponse` instead.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// User document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Lowercased, trimmed email address (unique)
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub boards: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into().trim().to_string(),
            email: normalize_email(email),
            password_hash,
            avatar: String::new(),
            role: Role::User,
            boards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record membership of a board; returns false if it was already listed
    pub fn add_board(&mut self, board_id: Uuid) -> bool {
        if self.boards.contains(&board_id) {
            return false;
        }
        self.boards.push(board_id);
        true
    }

    pub fn remove_board(&mut self, board_id: &Uuid) -> bool {
        let before = self.boards.len();
        self.boards.retain(|id| id != board_id);
        before != self.boards.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
