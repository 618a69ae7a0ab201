//! Session metadata command.

use anyhow::Result;
use console::style;

use newshound_core::gateway::ChatGateway;
use newshound_types::status::SessionInfo;

use crate::state::AppState;

/// Show the backend's view of the current session.
///
/// Uses the persisted session id (minting one if none exists yet) and
/// registers it first, so this works even before the first `hound chat`
/// and reflects the same session chat would resume.
pub async fn session(state: &AppState, json: bool) -> Result<()> {
    let mut identity = state.identity();
    let id = identity.obtain_or_create().await?;
    state.gateway.register_session(&id).await?;
    let info = state.gateway.session_info(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_session_info(&info);
    Ok(())
}

/// Styled session block, shared with the in-chat `/session` command.
pub fn print_session_info(info: &SessionInfo) {
    println!();
    println!(
        "  {} Session {}",
        style("📰").bold(),
        style(&info.session_id).cyan()
    );
    println!();
    println!(
        "  Created:  {}",
        info.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Messages: {}", style(info.message_count).bold());
    if info.ttl_seconds >= 0 {
        println!(
            "  Expires:  {} ({})",
            info.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
            style(format_ttl(info.ttl_seconds)).dim()
        );
    } else {
        // Negative TTL is the backend's no-expiry sentinel.
        println!("  Expires:  {}", style("never").dim());
    }
    println!("  Status:   {}", info.status);
    println!();
}

fn format_ttl(seconds: i64) -> String {
    if seconds >= 3600 {
        format!("{:.1}h left", seconds as f64 / 3600.0)
    } else if seconds >= 60 {
        format!("{}m left", seconds / 60)
    } else {
        format!("{seconds}s left")
    }
}
