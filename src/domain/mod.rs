pub mod feed;
pub mod follow;
pub mod rss;
pub mod user;

pub use feed::Feed;
pub use follow::FeedFollow;
pub use rss::{RssChannel, RssFeed, RssItem};
pub use user::User;
