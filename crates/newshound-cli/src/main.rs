//! newshound CLI entry point.
//!
//! Binary name: `hound`
//!
//! Parses CLI arguments, wires the HTTP gateway and file-backed session
//! store, then dispatches to the requested command. Run with no
//! subcommand it drops straight into the interactive chat loop.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,newshound_cli=debug,newshound_core=debug,newshound_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init(cli.api_url.clone()).await?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            cli::chat::run_chat_loop(&state).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Session => {
            cli::session::session(&state, cli.json).await?;
        }

        Commands::Reset => {
            cli::reset::reset(&state, cli.json).await?;
        }
    }

    Ok(())
}
