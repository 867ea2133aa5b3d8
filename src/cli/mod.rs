pub mod commands;
pub mod middleware;
pub mod registry;

use std::path::PathBuf;

use clap::Parser;

use crate::app::{AppState, GatorError, Result};
use crate::config::Config;

pub use registry::{Command, Commands, Handler};

#[derive(Parser)]
#[command(name = "gator")]
#[command(about = "A multi-user RSS feed aggregator", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/gator/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command to run (register, login, reset, users, addfeed, feeds,
    /// follow, following, unfollow, agg)
    pub command: Option<String>,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// The command line to dispatch, or `None` when no command was given.
    pub fn command_line(&self) -> Option<Command> {
        self.command
            .as_ref()
            .map(|name| Command::new(name.clone(), self.args.clone()))
    }
}

/// Load the config, open the store and dispatch the single command `cli` names.
pub async fn run(cli: Cli) -> Result<()> {
    let registry = commands::default_registry();

    let Some(command) = cli.command_line() else {
        return Err(GatorError::Usage(registry.usage()));
    };

    let (config, config_path) = Config::load(cli.config.as_deref())?;
    let mut state = AppState::new(config, config_path)?;

    registry.run(&mut state, &command).await
}

/// The one line printed to stderr when a command fails.
pub fn render_error(err: &GatorError) -> String {
    format!("Error: {}", err)
}
