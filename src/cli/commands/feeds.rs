use std::io::Write;

use async_trait::async_trait;

use crate::app::{AppState, GatorError, Result};
use crate::cli::middleware::UserHandler;
use crate::cli::registry::{Command, Handler};
use crate::domain::User;

/// The feed `agg` reads.
pub const AGG_FEED_URL: &str = "https://www.wagslane.dev/index.xml";

pub struct AddFeed;

#[async_trait]
impl UserHandler for AddFeed {
    async fn run(&self, state: &mut AppState, cmd: &Command, user: User) -> Result<()> {
        let (Some(name), Some(url)) = (cmd.arg(0), cmd.arg(1)) else {
            writeln!(state.out, "Usage: {} <name> <url>", cmd.name)?;
            return Ok(());
        };

        let feed = state
            .store
            .create_feed(name, url, user.id)
            .map_err(|e| GatorError::AddFeedFailed(Box::new(e)))?;
        tracing::info!(feed = %feed.name, url = %feed.url, owner = %user.name, "feed added");

        writeln!(state.out, "User {} added Feed {} successfully", user.name, feed.name)?;
        Ok(())
    }
}

pub struct Feeds;

#[async_trait]
impl Handler for Feeds {
    async fn run(&self, state: &mut AppState, _cmd: &Command) -> Result<()> {
        let feeds = state
            .store
            .get_feeds()
            .map_err(|e| GatorError::ListFailed(Box::new(e)))?;

        for feed in feeds {
            let owner = state
                .store
                .get_user_by_id(feed.user_id)
                .and_then(|owner| {
                    owner.ok_or_else(|| GatorError::UserIdNotFound(feed.user_id))
                })
                .map_err(|e| GatorError::ListFailed(Box::new(e)))?;

            writeln!(state.out, "Feed: {}", feed.name)?;
            writeln!(state.out, "URL: {}", feed.url)?;
            writeln!(state.out, "User: {}", owner.name)?;
            writeln!(state.out, "---")?;
        }

        Ok(())
    }
}

pub struct Agg;

#[async_trait]
impl Handler for Agg {
    async fn run(&self, state: &mut AppState, _cmd: &Command) -> Result<()> {
        let feed = state
            .fetch_feed(AGG_FEED_URL)
            .await
            .map_err(|e| GatorError::AggFailed(Box::new(e)))?;
        let channel = feed.channel;

        writeln!(state.out, "Title: {}", channel.title)?;
        writeln!(state.out, "Link: {}", channel.link)?;
        writeln!(state.out, "Description: {}", channel.description)?;
        writeln!(state.out, "Items:")?;

        match channel.items.first() {
            Some(item) => {
                writeln!(state.out, "Title: {}", item.title)?;
                writeln!(state.out, "Link: {}", item.link)?;
                writeln!(state.out, "Description: {}", item.description)?;
                if let Some(published) = item.pub_date {
                    writeln!(state.out, "Published: {}", published.to_rfc2822())?;
                }
            }
            None => writeln!(state.out, "(no items)")?,
        }

        Ok(())
    }
}
