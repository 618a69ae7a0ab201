//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when the chat loop starts, showing the backend
//! in use, the (abbreviated) session id, and how much history was
//! restored.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(api_url: &str, session_prefix: &str, hydrated_turns: usize) {
    println!();
    println!("  📰 {}", style("News Chatbot").cyan().bold());
    println!(
        "  {}",
        style("Ask me anything about recent news from BBC.").dim()
    );
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(api_url).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(format!("{session_prefix}...")).dim()
    );
    if hydrated_turns > 0 {
        println!(
            "  {}  {}",
            style("History:").bold(),
            style(format!("{hydrated_turns} earlier messages")).dim()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
