//! Handler wrappers.

use std::io::Write;

use async_trait::async_trait;

use crate::app::{resolve_current_user, AppState, Result};
use crate::cli::registry::{Command, Handler};
use crate::domain::User;

/// A handler that only makes sense for a logged in user.
#[async_trait]
pub trait UserHandler: Send + Sync {
    async fn run(&self, state: &mut AppState, cmd: &Command, user: User) -> Result<()>;
}

/// Adapts a [`UserHandler`] to the registry's [`Handler`] shape.
///
/// Without a session the wrapped handler is skipped and the command
/// succeeds after printing a notice.
pub struct LoggedIn<H> {
    inner: H,
}

pub fn logged_in<H: UserHandler>(inner: H) -> LoggedIn<H> {
    LoggedIn { inner }
}

#[async_trait]
impl<H: UserHandler> Handler for LoggedIn<H> {
    async fn run(&self, state: &mut AppState, cmd: &Command) -> Result<()> {
        let Some(user) = resolve_current_user(state)? else {
            tracing::warn!(command = %cmd.name, "skipped, no session");
            writeln!(state.out, "User not logged in")?;
            return Ok(());
        };

        self.inner.run(state, cmd, user).await
    }
}
