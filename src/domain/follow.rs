use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An edge saying `user_id` follows `feed_id`.
///
/// Several edges may exist for the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFollow {
    pub id: i64,
    pub user_id: i64,
    pub feed_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
