use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched and parsed feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    pub channel: RssChannel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Entries in document order.
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: Option<DateTime<Utc>>,
}
