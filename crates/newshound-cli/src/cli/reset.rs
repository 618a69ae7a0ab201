//! Non-interactive session reset command.

use anyhow::Result;
use console::style;
use tracing::warn;

use newshound_core::gateway::ChatGateway;

use crate::state::AppState;

/// Clear backend history for the persisted session and mint a fresh id.
///
/// Clearing is best-effort (an unreachable backend does not block the
/// new id), but minting and registering the replacement must succeed.
pub async fn reset(state: &AppState, json: bool) -> Result<()> {
    let mut identity = state.identity();

    if let Ok(old) = identity.obtain_or_create().await {
        if let Err(err) = state.gateway.clear_history(&old).await {
            warn!(%err, session = %old, "history clear failed during reset");
        }
    }

    let id = identity.reset().await?;
    state.gateway.register_session(&id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "sessionId": id.as_str() }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Fresh session: {}",
        style("✓").green().bold(),
        style(id.as_str()).cyan()
    );
    println!();
    Ok(())
}
