//! The active identity for one invocation.

use crate::app::context::AppState;
use crate::app::error::{GatorError, Result};
use crate::config::Config;
use crate::domain::User;

/// Who is logged in, if anyone.
///
/// Lives in [`AppState`]; only `register`, `login` and `reset` change it, and
/// each of them writes it back through [`AppState::persist_session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user_name: Option<String>,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        Self {
            current_user_name: config.current_user().map(String::from),
        }
    }

    pub fn current_user_name(&self) -> Option<&str> {
        self.current_user_name.as_deref()
    }

    pub fn log_in(&mut self, name: impl Into<String>) {
        self.current_user_name = Some(name.into());
    }

    pub fn clear(&mut self) {
        self.current_user_name = None;
    }
}

/// Load the user record behind the session.
///
/// `Ok(None)` when nobody is logged in. A session naming a user the store
/// no longer has is an error.
pub fn resolve_current_user(state: &AppState) -> Result<Option<User>> {
    let Some(name) = state.session.current_user_name() else {
        return Ok(None);
    };

    match state.store.get_user(name)? {
        Some(user) => Ok(Some(user)),
        None => Err(GatorError::UserNotFound(name.to_string())),
    }
}
