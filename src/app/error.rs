use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::user::MIN_USERNAME_LENGTH;

#[derive(Error, Debug)]
pub enum GatorError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),

    #[error("command {0} not found")]
    CommandNotFound(String),

    #[error("error executing command {name}: {source}")]
    Command {
        name: String,
        #[source]
        source: Box<GatorError>,
    },

    #[error("invalid username {0:?}: must be at least {min} characters long", min = MIN_USERNAME_LENGTH)]
    InvalidUsername(String),

    #[error("user {0} already exists")]
    UserExists(String),

    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("user #{0} not found")]
    UserIdNotFound(i64),

    #[error("feed not found: {0}")]
    FeedNotFound(String),

    #[error("feed #{0} not found")]
    FeedIdNotFound(i64),

    #[error("failed to create user: {0}")]
    CreateFailed(#[source] Box<GatorError>),

    #[error("failed to reset users: {0}")]
    ResetFailed(#[source] Box<GatorError>),

    #[error("failed to list: {0}")]
    ListFailed(#[source] Box<GatorError>),

    #[error("failed to add feed: {0}")]
    AddFeedFailed(#[source] Box<GatorError>),

    #[error("failed to fetch feed: {0}")]
    AggFailed(#[source] Box<GatorError>),

    #[error("{0}")]
    Other(String),
}

impl GatorError {
    /// The error a handler returned, with the dispatcher's command context removed.
    pub fn root(&self) -> &GatorError {
        match self {
            GatorError::Command { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatorError>;
