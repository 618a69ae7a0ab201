//! Terminal rendering for conversation turns, sources, and the error
//! banner.

use console::style;

use newshound_types::chat::{RelevantArticle, Role, Turn};

/// Print one conversation turn with its role label.
///
/// Failed turns (the synthetic reply appended when a submission fails)
/// render in red so they read as errors, not answers.
pub fn print_turn(turn: &Turn) {
    match turn.role {
        Role::User => {
            println!("  {} {}", style("You >").green().bold(), turn.content);
        }
        Role::Assistant if turn.failed => {
            println!(
                "  {} {}",
                style("News >").red().bold(),
                style(&turn.content).red()
            );
        }
        Role::Assistant => {
            println!("  {} {}", style("News >").cyan().bold(), turn.content);
        }
    }
}

/// Dim footer under a fresh assistant reply: local time and source count.
pub fn print_reply_footer(turn: &Turn) {
    let when = turn
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M:%S");
    if turn.sources.is_empty() {
        println!("  {} {}", style("|").dim(), style(when).dim());
    } else {
        println!(
            "  {} {} {} {} sources {} {}",
            style("|").dim(),
            style(when).dim(),
            style("\u{00b7}").dim(),
            style(turn.sources.len()).dim(),
            style("\u{00b7}").dim(),
            style("/sources to view").dim(),
        );
    }
}

/// Numbered source list for the most recent answer.
pub fn print_sources(sources: &[RelevantArticle]) {
    if sources.is_empty() {
        println!();
        println!(
            "  {} No sources recorded for the last answer.",
            style("i").blue().bold()
        );
        println!();
        return;
    }

    println!();
    println!("  {}", style("── Sources ──").dim());
    for (index, article) in sources.iter().enumerate() {
        println!("  {}. {}", index + 1, style(&article.title).bold());
        println!("     {}", style(&article.url).cyan().underlined());
        let mut meta = format!("score {:.2}", article.score);
        if !article.date_publish.is_empty() {
            meta.push_str(&format!(" \u{00b7} {}", article.date_publish));
        }
        if !article.authors.is_empty() {
            meta.push_str(&format!(" \u{00b7} {}", article.authors));
        }
        println!("     {}", style(meta).dim());
    }
    println!();
}

/// The error banner shown after a failure, with recovery hints.
pub fn print_error_banner(message: &str) {
    println!();
    println!("  {} {}", style("✗").red().bold(), style(message).red());
    println!(
        "  {}",
        style("Use /reset to start fresh, /dismiss to hide this.").dim()
    );
    println!();
}

/// Shown when the conversation starts with no restored history.
pub fn print_empty_state() {
    println!("  {}", style("Welcome to News Chatbot!").bold());
    println!(
        "  {}",
        style("Try: \"What are the latest technology news?\"").dim()
    );
    println!();
}
