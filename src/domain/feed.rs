use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named feed source, owned by the user who added it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
