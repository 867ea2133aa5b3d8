pub mod sqlite;

use std::time::Duration;

use crate::app::Result;
use crate::domain::{Feed, FeedFollow, User};

pub use sqlite::SqliteStore;

/// Upper bound on how long a single statement may wait for the database.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub trait Store {
    // User operations
    fn get_user(&self, name: &str) -> Result<Option<User>>;
    fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    fn get_user_id_by_name(&self, name: &str) -> Result<Option<i64>>;
    fn get_users(&self) -> Result<Vec<User>>;
    fn create_user(&self, name: &str) -> Result<User>;
    /// Removes every user; feeds and follows go with them.
    fn delete_users(&self) -> Result<usize>;

    // Feed operations
    fn create_feed(&self, name: &str, url: &str, user_id: i64) -> Result<Feed>;
    fn get_feed_by_url(&self, url: &str) -> Result<Option<Feed>>;
    fn get_feeds(&self) -> Result<Vec<Feed>>;
    fn get_feed_name_by_id(&self, id: i64) -> Result<Option<String>>;

    // Follow operations
    fn create_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<FeedFollow>;
    fn get_feed_follows_for_user(&self, user_id: i64) -> Result<Vec<FeedFollow>>;
    /// Removes the edges of one `(user, feed)` pair and returns how many went.
    fn delete_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<usize>;
}
