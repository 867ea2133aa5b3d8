use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum username length, counted in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check a candidate name before anything is written for it.
    pub fn is_valid_name(name: &str) -> bool {
        name.chars().count() >= MIN_USERNAME_LENGTH
    }
}
