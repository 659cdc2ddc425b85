use std::path::Path;

use devpulse_aggregate::{top_repos, window_start};
use devpulse_core::config::{MAX_DAYS, MAX_TOP_REPOS};
use devpulse_core::error::check_window;
use devpulse_core::RepoStats;

use crate::render;
use crate::view::{print_json, View, ViewArgs};

/// Repositories ranked over the last `days` (default: repoDays), at most
/// `limit` (default: topRepos).
pub fn ranked(view: &View, days: Option<u32>, limit: Option<u32>) -> anyhow::Result<Vec<RepoStats>> {
    let days = check_window("repoDays", days.unwrap_or(view.config.repo_days), MAX_DAYS)?;
    let limit = check_window("topRepos", limit.unwrap_or(view.config.top_repos), MAX_TOP_REPOS)?;

    let activities = view.data.activities()?;
    let since = window_start(view.today, days)?;
    let mut repos = top_repos(&activities, since, view.today, view.config.source_filter())?;
    repos.truncate(limit as usize);
    Ok(repos)
}

/// `devpulse top-repos`
pub fn execute(repo_root: &Path, args: &ViewArgs, days: Option<u32>, limit: Option<u32>) -> anyhow::Result<()> {
    let view = View::resolve(repo_root, args)?;
    let repos = ranked(&view, days, limit)?;
    if view.json {
        print_json(&repos)
    } else {
        print!("{}", render::repos(&repos));
        Ok(())
    }
}
