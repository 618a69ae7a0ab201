//! CLI command definitions and dispatch for the `hound` binary.
//!
//! Uses clap derive macros for argument parsing. The default command is
//! `chat`, so a bare `hound` opens the interactive loop.

pub mod chat;
pub mod reset;
pub mod session;
pub mod status;

use clap::{Parser, Subcommand};

/// Ask questions about recent news from your terminal.
#[derive(Parser)]
#[command(name = "hound", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (overrides config.toml).
    #[arg(long, env = "NEWSHOUND_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat,

    /// Backend health dashboard.
    Status,

    /// Show the current session's backend metadata.
    Session,

    /// Clear backend history and mint a fresh session.
    Reset,
}
