//! Name-to-handler dispatch.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::app::{AppState, GatorError, Result};

/// One parsed invocation: the command name and everything after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

/// A unit of command logic.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn run(&self, state: &mut AppState, cmd: &Command) -> Result<()>;
}

#[derive(Default)]
pub struct Commands {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any handler already there.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn register<H: Handler + 'static>(&mut self, name: &str, handler: H) {
        assert!(!name.is_empty(), "command name cannot be empty");

        if self
            .handlers
            .insert(name.to_string(), Box::new(handler))
            .is_some()
        {
            tracing::debug!(command = name, "handler replaced");
        }
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn usage(&self) -> String {
        format!(
            "usage: gator <command> [args...]\ncommands: {}",
            self.names().join(", ")
        )
    }

    pub async fn run(&self, state: &mut AppState, cmd: &Command) -> Result<()> {
        let handler = self
            .handlers
            .get(&cmd.name)
            .ok_or_else(|| GatorError::CommandNotFound(cmd.name.clone()))?;

        tracing::debug!(command = %cmd.name, args = ?cmd.args, "dispatching");

        handler
            .run(state, cmd)
            .await
            .map_err(|source| GatorError::Command {
                name: cmd.name.clone(),
                source: Box::new(source),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio_test::{assert_err, assert_ok};

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for Counting {
        async fn run(&self, _state: &mut AppState, _cmd: &Command) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Handler for Failing {
        async fn run(&self, _state: &mut AppState, cmd: &Command) -> Result<()> {
            Err(GatorError::FeedNotFound(cmd.arg(0).unwrap_or_default().to_string()))
        }
    }

    #[tokio::test]
    async fn test_run_invokes_registered_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut commands = Commands::new();
        commands.register("ping", Counting(calls.clone()));

        let mut state = AppState::in_memory().unwrap();
        assert_ok!(commands.run(&mut state, &Command::new("ping", vec![])).await);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_command_invokes_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut commands = Commands::new();
        commands.register("ping", Counting(calls.clone()));

        let mut state = AppState::in_memory().unwrap();
        let err = commands
            .run(&mut state, &Command::new("pong", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, GatorError::CommandNotFound(ref name) if name == "pong"));
        assert_eq!(err.to_string(), "command pong not found");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_carries_command_name() {
        let mut commands = Commands::new();
        commands.register("follow", Failing);

        let mut state = AppState::in_memory().unwrap();
        let cmd = Command::new("follow", vec!["https://example.com/feed.xml".into()]);
        let err = assert_err!(commands.run(&mut state, &cmd).await);

        assert!(err.to_string().starts_with("error executing command follow:"));
        assert!(matches!(err.root(), GatorError::FeedNotFound(_)));
    }

    #[tokio::test]
    async fn test_reregistering_replaces_handler() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut commands = Commands::new();
        commands.register("ping", Counting(first.clone()));
        commands.register("ping", Counting(second.clone()));

        let mut state = AppState::in_memory().unwrap();
        commands
            .run(&mut state, &Command::new("ping", vec![]))
            .await
            .unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(commands.names(), vec!["ping"]);
    }

    #[test]
    #[should_panic(expected = "command name cannot be empty")]
    fn test_empty_name_panics() {
        let mut commands = Commands::new();
        commands.register("", Failing);
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("addfeed", vec!["Blog".into(), "https://x.test/feed".into()]);
        assert_eq!(cmd.arg(0), Some("Blog"));
        assert_eq!(cmd.arg(1), Some("https://x.test/feed"));
        assert_eq!(cmd.arg(2), None);
    }
}
