use chrono::Utc;
use feed_rs::model::Text;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{GatorError, Result};
use crate::domain::{RssChannel, RssFeed, RssItem};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a feed document into its channel and items.
    ///
    /// Titles and descriptions are entity-decoded a second time on top of
    /// the XML decoding, since many feeds escape their HTML twice.
    pub fn normalize(&self, body: &[u8]) -> Result<RssFeed> {
        let feed = parser::parse(body).map_err(|e| GatorError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| RssItem {
                title: unescape(entry.title),
                link: entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
                description: match entry.summary {
                    Some(summary) => unescape(Some(summary)),
                    None => entry
                        .content
                        .and_then(|c| c.body)
                        .map(|b| decode_html_entities(&b).to_string())
                        .unwrap_or_default(),
                },
                pub_date: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc)),
            })
            .collect();

        let channel = RssChannel {
            title: unescape(feed.title),
            link: feed
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            description: unescape(feed.description),
            items,
        };

        Ok(RssFeed { channel })
    }
}

fn unescape(text: Option<Text>) -> String {
    text.map(|t| decode_html_entities(&t.content).to_string())
        .unwrap_or_default()
}
