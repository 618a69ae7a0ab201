//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for session
//! management, backend inspection, and the error banner.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Clear backend history and start a fresh session.
    Reset,
    /// Show backend health inline.
    Status,
    /// Show session metadata inline.
    Session,
    /// Replay the conversation so far.
    History,
    /// Show the sources behind the most recent answer.
    Sources,
    /// Hide the error banner (the conversation stays locked).
    Dismiss,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`. Trailing words
/// after the command name are ignored; none of these commands take
/// arguments.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/reset" | "/new" => Some(ChatCommand::Reset),
        "/status" => Some(ChatCommand::Status),
        "/session" => Some(ChatCommand::Session),
        "/history" | "/hist" => Some(ChatCommand::History),
        "/sources" | "/src" => Some(ChatCommand::Sources),
        "/dismiss" => Some(ChatCommand::Dismiss),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/clear").cyan(), "Clear the screen");
    println!(
        "  {}    {}",
        style("/reset").cyan(),
        "Start a fresh session (clears backend history)"
    );
    println!("  {}   {}", style("/status").cyan(), "Show backend health");
    println!("  {}  {}", style("/session").cyan(), "Show session details");
    println!(
        "  {}  {}",
        style("/history").cyan(),
        "Replay the conversation so far"
    );
    println!(
        "  {}  {}",
        style("/sources").cyan(),
        "Show sources for the last answer"
    );
    println!("  {}  {}", style("/dismiss").cyan(), "Hide the error banner");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim());
    println!();
}
