//! # gator
//!
//! A multi-user RSS feed aggregator for the terminal.
//!
//! ## Architecture
//!
//! Every invocation runs exactly one command:
//!
//! ```text
//! Cli → Commands registry → [LoggedIn gate] → handler → Store / Fetcher
//! ```
//!
//! - [`cli`]: argument parsing, the command registry and every handler
//! - [`app`]: shared state, the session and error types
//! - [`store`]: SQLite persistence for users, feeds and follows
//! - [`fetcher`] and [`normalizer`]: download a feed and parse it
//!
//! ## Quick Start
//!
//! ```bash
//! gator register alice
//! gator addfeed "Lane's Blog" https://www.wagslane.dev/index.xml
//! gator follow https://www.wagslane.dev/index.xml
//! gator following
//! ```

/// Application state, session and error handling.
///
/// [`AppState`](app::AppState) carries the store, fetcher, session and
/// output sink into every handler.
pub mod app;

/// Command-line surface.
///
/// - [`Commands`](cli::Commands): name to handler dispatch
/// - [`logged_in`](cli::middleware::logged_in): login gate for user-scoped commands
/// - [`commands`](cli::commands): register, login, reset, users, addfeed,
///   feeds, follow, following, unfollow, agg
pub mod cli;

/// Configuration file, including the persisted session.
///
/// Loads from `~/.config/gator/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`User`](domain::User), [`Feed`](domain::Feed), [`FeedFollow`](domain::FeedFollow)
/// - [`RssFeed`](domain::RssFeed): a parsed feed document
pub mod domain;

/// HTTP fetching with a bounded timeout.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing and entity decoding.
pub mod normalizer;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
