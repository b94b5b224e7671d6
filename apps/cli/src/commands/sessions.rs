//! Session history reporting.

use anyhow::Result;

use crate::context::AppContext;

pub fn show(ctx: &AppContext, limit: usize) -> Result<()> {
    let entries = ctx.log().recent(limit)?;
    if entries.is_empty() {
        println!("(no sessions yet)");
        return Ok(());
    }

    for entry in &entries {
        let started = entry.started_at.get(..16).unwrap_or(&entry.started_at);
        println!(
            "{:<8} | {:>3} | {:>5.1}% | {:>6.1}s | {}",
            entry.mode, entry.total, entry.accuracy, entry.duration, started
        );
    }
    Ok(())
}
