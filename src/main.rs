use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gator::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match cli::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", cli::render_error(&e));
            ExitCode::FAILURE
        }
    }
}
