use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique, case-sensitive name; identifies the user everywhere
    pub user_name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_name: user_name.into(),
            email,
            created_at: Utc::now(),
        }
    }
}

/// Registration request body
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserRequest {
    pub user_name: String,
    #[serde(default)]
    pub email: Option<String>,
}
