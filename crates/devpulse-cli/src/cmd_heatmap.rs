use std::path::Path;

use devpulse_aggregate::{build_heatmap, HeatmapGrid, HeatmapOptions};

use crate::render;
use crate::view::{print_json, View, ViewArgs};

/// Commit heatmap over `days` (default: heatmapDays) ending on the view date.
pub fn grid(view: &View, days: Option<u32>) -> anyhow::Result<HeatmapGrid> {
    let summaries = view.data.summaries()?;
    let options = HeatmapOptions {
        thresholds: view.config.level_thresholds,
        week_start: view.config.week_start,
    };
    Ok(build_heatmap(
        summaries.iter().map(|d| (d.date, d.total_commits)),
        days.unwrap_or(view.config.heatmap_days),
        view.today,
        &options,
    )?)
}

/// `devpulse heatmap`
pub fn execute(repo_root: &Path, args: &ViewArgs, days: Option<u32>) -> anyhow::Result<()> {
    let view = View::resolve(repo_root, args)?;
    let grid = grid(&view, days)?;
    if view.json {
        print_json(&grid)
    } else {
        print!("{}", render::heatmap(&grid));
        Ok(())
    }
}
