use std::path::Path;

use devpulse_aggregate::rollup_daily;

use crate::cmd_config::write_atomic;
use crate::source::SUMMARIES_FILE;
use crate::view::{print_json, View, ViewArgs};

/// `devpulse rollup`: derive daily summaries from activities.json.
///
/// With `--write`, the result replaces summaries.json in the data directory.
pub fn execute(repo_root: &Path, args: &ViewArgs, write: bool) -> anyhow::Result<()> {
    let view = View::resolve(repo_root, args)?;
    let activities = view.data.activities()?;
    let days = rollup_daily(&activities, view.config.source_filter());

    if write {
        let path = view.data.root().join(SUMMARIES_FILE);
        let body = serde_json::to_string_pretty(&serde_json::json!({ "summaries": days }))?;
        write_atomic(&path, body.as_bytes())?;
        println!("Wrote {} days to {}", days.len(), path.display());
        return Ok(());
    }

    if view.json {
        return print_json(&days);
    }
    if days.is_empty() {
        println!("No activity.");
        return Ok(());
    }
    for d in &days {
        println!(
            "{}  commits {:>4}  prs {:>3}  coding {:>4}m",
            devpulse_core::format_date(d.date),
            d.total_commits,
            d.total_prs,
            d.coding_minutes
        );
    }
    Ok(())
}
