//! Backend health dashboard command.

use anyhow::Result;
use console::style;

use newshound_core::gateway::ChatGateway;
use newshound_types::status::SystemStatus;

use crate::state::AppState;

/// Display the backend health dashboard.
///
/// Shows per-service connection state, the article store, and overall
/// backend status.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let status = state.gateway.fetch_status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_status(&status, &state.config.api_url);
    Ok(())
}

/// Styled status block, shared with the in-chat `/status` command.
pub fn print_status(status: &SystemStatus, api_url: &str) {
    println!();
    println!(
        "  {} newshound v{}",
        style("📰").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    // Per-service state
    println!("  {}", style("── Services ──").dim());
    for (name, service_state) in &status.services {
        let healthy = matches!(
            service_state.as_str(),
            "connected" | "configured" | "ready" | "ok"
        );
        println!(
            "  {} {}: {}",
            check_mark(healthy),
            name,
            style(service_state).dim()
        );
    }
    println!();

    // Article store
    println!("  {}", style("── Articles ──").dim());
    println!(
        "  Collection: {}",
        style(&status.database.collection).bold()
    );
    println!(
        "  Documents:  {}",
        style(status.database.document_count).bold()
    );
    println!("  Status:     {}", status.database.status);
    if !status.database.message.is_empty() {
        println!(
            "  {} {}",
            style("!").yellow().bold(),
            style(&status.database.message).dim()
        );
    }
    println!();

    // Overall
    println!("  {}", style("── Backend ──").dim());
    println!("  URL:      {}", style(api_url).dim());
    if status.status == "healthy" {
        println!("  Status:   {}", style(&status.status).green());
    } else {
        println!("  Status:   {}", style(&status.status).yellow());
    }
    println!(
        "  Reported: {}",
        style(status.timestamp.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    );
    println!();
}
