use std::path::Path;

use clap::ValueEnum;
use devpulse_aggregate::{daily_comparison, fill_daily_window, period_comparison, recent_periods};
use devpulse_core::{ComparisonPoint, Granularity};

use crate::render;
use crate::view::{print_json, View, ViewArgs};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Daily,
    Weekly,
    Monthly,
}

/// Comparison series at `scale`. `count` overrides the configured window
/// (summary days, weeks or months).
pub fn series(view: &View, scale: Scale, count: Option<u32>) -> anyhow::Result<Vec<ComparisonPoint>> {
    let summaries = view.data.summaries()?;
    let points = match scale {
        Scale::Daily => {
            let days = count.unwrap_or(view.config.summary_days);
            daily_comparison(&fill_daily_window(&summaries, days, view.today)?)
        }
        Scale::Weekly => {
            let weeks = count.unwrap_or(view.config.weeks);
            period_comparison(&recent_periods(&summaries, Granularity::Weekly, weeks, view.today)?)
        }
        Scale::Monthly => {
            let months = count.unwrap_or(view.config.months);
            period_comparison(&recent_periods(&summaries, Granularity::Monthly, months, view.today)?)
        }
    };
    Ok(points)
}

/// `devpulse trends`
pub fn execute(repo_root: &Path, args: &ViewArgs, scale: Scale, count: Option<u32>) -> anyhow::Result<()> {
    let view = View::resolve(repo_root, args)?;
    let points = series(&view, scale, count)?;
    if view.json {
        print_json(&points)
    } else {
        print!("{}", render::comparison(&points));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SUMMARIES_FILE;
    use serde_json::json;
    use std::path::PathBuf;

    fn view(root: &Path) -> View {
        let dir = root.join("data");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(SUMMARIES_FILE),
            json!({"summaries": [
                {"date": "2026-10-16", "totalCommits": 2},
                {"date": "2026-10-19", "totalCommits": 6, "totalPrs": 1}
            ]})
            .to_string(),
        )
        .unwrap();
        let args = ViewArgs {
            data: PathBuf::from("data"),
            today: Some("2026-10-19".into()),
            source: None,
            json: true,
        };
        View::resolve(root, &args).unwrap()
    }

    #[test]
    fn daily_window_is_filled_and_halved() {
        let tmp = tempfile::tempdir().unwrap();
        let points = series(&view(tmp.path()), Scale::Daily, Some(8)).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3].label, "10/19");
        assert_eq!(points[3].commits, 6);
        assert_eq!(points[3].prev_commits, 0);
        assert_eq!(points[0].label, "10/16");
        assert_eq!(points[0].commits, 2);
    }

    #[test]
    fn weekly_labels() {
        let tmp = tempfile::tempdir().unwrap();
        let points = series(&view(tmp.path()), Scale::Weekly, None).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "W43");
        assert_eq!(points[0].prev_commits, 2);
    }

    #[test]
    fn out_of_range_count_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(series(&view(tmp.path()), Scale::Monthly, Some(0)).is_err());
    }
}
