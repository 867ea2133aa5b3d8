use std::io::Write;

use async_trait::async_trait;

use crate::app::{AppState, GatorError, Result};
use crate::cli::middleware::UserHandler;
use crate::cli::registry::Command;
use crate::domain::User;

pub struct Follow;

#[async_trait]
impl UserHandler for Follow {
    async fn run(&self, state: &mut AppState, cmd: &Command, user: User) -> Result<()> {
        let Some(url) = cmd.arg(0) else {
            writeln!(state.out, "Usage: {} <url>", cmd.name)?;
            return Ok(());
        };

        let feed = state
            .store
            .get_feed_by_url(url)?
            .ok_or_else(|| GatorError::FeedNotFound(url.to_string()))?;

        let follow = state.store.create_feed_follow(user.id, feed.id)?;
        tracing::info!(user = %user.name, feed = %feed.name, id = follow.id, "feed followed");

        Ok(())
    }
}

pub struct Following;

#[async_trait]
impl UserHandler for Following {
    async fn run(&self, state: &mut AppState, _cmd: &Command, user: User) -> Result<()> {
        let follows = state.store.get_feed_follows_for_user(user.id)?;

        for follow in follows {
            let name = state
                .store
                .get_feed_name_by_id(follow.feed_id)?
                .ok_or_else(|| GatorError::FeedIdNotFound(follow.feed_id))?;
            writeln!(state.out, "-- {}", name)?;
        }

        Ok(())
    }
}

pub struct Unfollow;

#[async_trait]
impl UserHandler for Unfollow {
    async fn run(&self, state: &mut AppState, cmd: &Command, user: User) -> Result<()> {
        let Some(url) = cmd.arg(0) else {
            writeln!(state.out, "Usage: {} <url>", cmd.name)?;
            return Ok(());
        };

        let feed = state
            .store
            .get_feed_by_url(url)?
            .ok_or_else(|| GatorError::FeedNotFound(url.to_string()))?;

        let removed = state.store.delete_feed_follow(user.id, feed.id)?;
        if removed == 0 {
            writeln!(state.out, "Not following feed {}", url)?;
            return Ok(());
        }
        tracing::info!(user = %user.name, feed = %feed.name, removed, "feed unfollowed");

        writeln!(state.out, "Successfully unfollowed feed {}", url)?;
        Ok(())
    }
}
