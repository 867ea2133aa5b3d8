use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{GatorError, Result};
use crate::domain::{Feed, FeedFollow, User};
use crate::store::{Store, STORE_TIMEOUT};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(STORE_TIMEOUT)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations.to_latest(&mut conn)?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| GatorError::Other(format!("database connection poisoned: {}", e)))
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
        Ok(row
            .get::<_, String>(idx)
            .ok()
            .and_then(|s| Self::parse_datetime(&s))
            .unwrap_or_else(Utc::now))
    }

    fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: Self::timestamp(row, 2)?,
            updated_at: Self::timestamp(row, 3)?,
        })
    }

    fn feed_from_row(row: &Row<'_>) -> rusqlite::Result<Feed> {
        Ok(Feed {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            user_id: row.get(3)?,
            created_at: Self::timestamp(row, 4)?,
            updated_at: Self::timestamp(row, 5)?,
        })
    }

    fn follow_from_row(row: &Row<'_>) -> rusqlite::Result<FeedFollow> {
        Ok(FeedFollow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            feed_id: row.get(2)?,
            created_at: Self::timestamp(row, 3)?,
            updated_at: Self::timestamp(row, 4)?,
        })
    }
}

impl Store for SqliteStore {
    fn get_user(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM users WHERE name = ?1",
                params![name],
                Self::user_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM users WHERE id = ?1",
                params![id],
                Self::user_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_user_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id FROM users WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(result)
    }

    fn get_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;

        let mut stmt =
            conn.prepare("SELECT id, name, created_at, updated_at FROM users ORDER BY name")?;

        let users = stmt
            .query_map([], Self::user_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn create_user(&self, name: &str) -> Result<User> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO users (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![name, now.to_rfc3339(), now.to_rfc3339()],
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    fn delete_users(&self) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM users", [])?;
        Ok(deleted)
    }

    fn create_feed(&self, name: &str, url: &str, user_id: i64) -> Result<Feed> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO feeds (name, url, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, url, user_id, now.to_rfc3339(), now.to_rfc3339()],
        )?;

        Ok(Feed {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            url: url.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_feed_by_url(&self, url: &str) -> Result<Option<Feed>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, name, url, user_id, created_at, updated_at
                 FROM feeds WHERE url = ?1",
                params![url],
                Self::feed_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_feeds(&self) -> Result<Vec<Feed>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, url, user_id, created_at, updated_at
             FROM feeds ORDER BY name, url",
        )?;

        let feeds = stmt
            .query_map([], Self::feed_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(feeds)
    }

    fn get_feed_name_by_id(&self, id: i64) -> Result<Option<String>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT name FROM feeds WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(result)
    }

    fn create_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<FeedFollow> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO feed_follows (user_id, feed_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, feed_id, now.to_rfc3339(), now.to_rfc3339()],
        )?;

        Ok(FeedFollow {
            id: conn.last_insert_rowid(),
            user_id,
            feed_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_feed_follows_for_user(&self, user_id: i64) -> Result<Vec<FeedFollow>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, feed_id, created_at, updated_at
             FROM feed_follows
             WHERE user_id = ?1 AND feed_id IS NOT NULL
             ORDER BY id",
        )?;

        let follows = stmt
            .query_map(params![user_id], Self::follow_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(follows)
    }

    fn delete_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<usize> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM feed_follows WHERE user_id = ?1 AND feed_id = ?2",
            params![user_id, feed_id],
        )?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_URL: &str = "https://example.com/feed.xml";

    #[test]
    fn test_create_and_get_user() {
        let store = SqliteStore::in_memory().unwrap();
        let created = store.create_user("alice").unwrap();

        let retrieved = store.get_user("alice").unwrap().unwrap();
        assert_eq!(retrieved.id, created.id);
        assert_eq!(retrieved.name, "alice");

        assert_eq!(store.get_user_id_by_name("alice").unwrap(), Some(created.id));
        assert_eq!(store.get_user_by_id(created.id).unwrap().unwrap().name, "alice");
    }

    #[test]
    fn test_user_names_are_case_sensitive() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_user("alice").unwrap();

        assert!(store.get_user("Alice").unwrap().is_none());
        assert!(store.create_user("Alice").is_ok());
    }

    #[test]
    fn test_duplicate_user_name_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_user("alice").unwrap();

        let err = store.create_user("alice").unwrap_err();
        assert!(matches!(err, GatorError::Database(_)));
    }

    #[test]
    fn test_duplicate_feed_url_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let user = store.create_user("alice").unwrap();
        store.create_feed("Blog", FEED_URL, user.id).unwrap();

        assert!(store.create_feed("Other", FEED_URL, user.id).is_err());
    }

    #[test]
    fn test_feed_requires_existing_owner() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.create_feed("Blog", FEED_URL, 42).is_err());
    }

    #[test]
    fn test_get_feed_by_url_exact_match() {
        let store = SqliteStore::in_memory().unwrap();
        let user = store.create_user("alice").unwrap();
        let feed = store.create_feed("Blog", FEED_URL, user.id).unwrap();

        let retrieved = store.get_feed_by_url(FEED_URL).unwrap().unwrap();
        assert_eq!(retrieved.id, feed.id);
        assert_eq!(retrieved.name, "Blog");
        assert_eq!(retrieved.user_id, user.id);

        assert!(store
            .get_feed_by_url("https://example.com/feed.xml/")
            .unwrap()
            .is_none());
        assert_eq!(store.get_feed_name_by_id(feed.id).unwrap(), Some("Blog".into()));
    }

    #[test]
    fn test_double_follow_is_permitted() {
        let store = SqliteStore::in_memory().unwrap();
        let user = store.create_user("alice").unwrap();
        let feed = store.create_feed("Blog", FEED_URL, user.id).unwrap();

        store.create_feed_follow(user.id, feed.id).unwrap();
        store.create_feed_follow(user.id, feed.id).unwrap();

        assert_eq!(store.get_feed_follows_for_user(user.id).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_follow_only_touches_pair() {
        let store = SqliteStore::in_memory().unwrap();
        let alice = store.create_user("alice").unwrap();
        let bob = store.create_user("bob").unwrap();
        let feed = store.create_feed("Blog", FEED_URL, alice.id).unwrap();

        store.create_feed_follow(alice.id, feed.id).unwrap();
        store.create_feed_follow(bob.id, feed.id).unwrap();

        assert_eq!(store.delete_feed_follow(alice.id, feed.id).unwrap(), 1);
        assert_eq!(store.delete_feed_follow(alice.id, feed.id).unwrap(), 0);

        assert!(store.get_feed_follows_for_user(alice.id).unwrap().is_empty());
        assert_eq!(store.get_feed_follows_for_user(bob.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_users_cascades() {
        let store = SqliteStore::in_memory().unwrap();
        let alice = store.create_user("alice").unwrap();
        let bob = store.create_user("bob").unwrap();
        let feed = store.create_feed("Blog", FEED_URL, alice.id).unwrap();
        store.create_feed_follow(bob.id, feed.id).unwrap();

        assert_eq!(store.delete_users().unwrap(), 2);

        assert!(store.get_users().unwrap().is_empty());
        assert!(store.get_feeds().unwrap().is_empty());
        assert!(store.get_feed_follows_for_user(bob.id).unwrap().is_empty());
    }

    #[test]
    fn test_on_disk_store_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("gator.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.create_user("alice").unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert!(store.get_user("alice").unwrap().is_some());
    }
}
