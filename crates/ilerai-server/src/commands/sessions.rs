use anyhow::{Context, Result};

use ilerai_server::Runtime;

pub async fn list(runtime: &Runtime) -> Result<()> {
    let sessions = runtime
        .engine
        .list_sessions()
        .await
        .context("failed to list sessions")?;

    if sessions.is_empty() {
        println!("No stored sessions.");
        return Ok(());
    }

    println!("{:<36}  {:<16}  {:<15}  UPDATED", "SESSION", "PHONE", "MENU");
    for session in &sessions {
        println!(
            "{:<36}  {:<16}  {:<15}  {}",
            session.session_id,
            session.phone_number,
            session.current_menu.as_str(),
            session.updated_at
        );
    }
    println!("\n{} session(s)", sessions.len());
    Ok(())
}

pub async fn prune(runtime: &Runtime, older_than_minutes: i64) -> Result<()> {
    let removed = runtime
        .engine
        .prune_sessions(chrono::Duration::minutes(older_than_minutes))
        .await
        .context("failed to prune sessions")?;

    println!(
        "🧹 Removed {} session(s) idle for more than {} minute(s)",
        removed, older_than_minutes
    );
    Ok(())
}
