use devpulse_core::error::Result;
use devpulse_core::{
    format_date, ActivityRecord, ComparisonPoint, DailySummary, DashboardConfig, Granularity, PeriodSummary,
    RepoStats, Summary,
};
use serde::Serialize;
use time::Date;

use crate::compare::{daily_comparison, period_comparison, split_halves};
use crate::delta::percent_delta;
use crate::heatmap::{build_heatmap, HeatmapGrid, HeatmapOptions};
use crate::period::recent_periods;
use crate::rollup::{recent_activities, top_repos};
use crate::window::{fill_daily_window, window_start};

/// Everything fetched for one render. Gathered up front; a failed fetch never
/// reaches this point.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs {
    pub summaries: Vec<DailySummary>,
    pub activities: Vec<ActivityRecord>,
}

/// A headline number with its previous-window value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub current: u64,
    pub previous: u64,
    /// Signed whole percent; 0 when there is no previous value.
    pub delta: i64,
}

impl StatCard {
    pub fn new(current: u64, previous: u64) -> Self {
        Self {
            current,
            previous,
            delta: percent_delta(current, previous),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub commits: StatCard,
    pub prs: StatCard,
    pub active_days: StatCard,
    pub coding_minutes: StatCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trends {
    pub daily: Vec<ComparisonPoint>,
    pub weekly: Vec<ComparisonPoint>,
    pub monthly: Vec<ComparisonPoint>,
}

/// The full render model for one dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub as_of: String,
    pub cards: SummaryCards,
    pub trends: Trends,
    pub weekly: Vec<PeriodSummary>,
    pub monthly: Vec<PeriodSummary>,
    pub heatmap: HeatmapGrid,
    pub top_repos: Vec<RepoStats>,
    pub recent: Vec<ActivityRecord>,
}

fn totals<T: Summary>(items: &[T]) -> (u64, u64, u64) {
    items.iter().fold((0, 0, 0), |(c, p, m), s| {
        (c + s.total_commits(), p + s.total_prs(), m + s.coding_minutes())
    })
}

fn active_count(days: &[DailySummary]) -> u64 {
    days.iter().filter(|d| d.is_active()).count() as u64
}

/// Stat cards over the summary window: the newer half against the older half.
pub fn summary_cards(window: &[DailySummary]) -> SummaryCards {
    let (previous, current) = split_halves(window);
    let (cur_commits, cur_prs, cur_minutes) = totals(current);
    let (prev_commits, prev_prs, prev_minutes) = totals(previous);
    SummaryCards {
        commits: StatCard::new(cur_commits, prev_commits),
        prs: StatCard::new(cur_prs, prev_prs),
        active_days: StatCard::new(active_count(current), active_count(previous)),
        coding_minutes: StatCard::new(cur_minutes, prev_minutes),
    }
}

/// Assemble the dashboard from already-fetched inputs.
///
/// Every widget is anchored on `today`: input dated after it is ignored.
/// Summaries are not source-filtered; the source filter applies to the
/// activity widgets (top repos and the timeline).
pub fn build_dashboard(inputs: &DashboardInputs, config: &DashboardConfig, today: Date) -> Result<Dashboard> {
    config.validate()?;
    let source = config.source_filter();

    let window = fill_daily_window(&inputs.summaries, config.summary_days, today)?;
    let cards = summary_cards(&window);

    let weekly = recent_periods(&inputs.summaries, Granularity::Weekly, config.weeks, today)?;
    let monthly = recent_periods(&inputs.summaries, Granularity::Monthly, config.months, today)?;

    let options = HeatmapOptions {
        thresholds: config.level_thresholds,
        week_start: config.week_start,
    };
    let heatmap = build_heatmap(
        inputs.summaries.iter().map(|d| (d.date, d.total_commits)),
        config.heatmap_days,
        today,
        &options,
    )?;

    let since = window_start(today, config.repo_days)?;
    let mut repos = top_repos(&inputs.activities, since, today, source)?;
    repos.truncate(config.top_repos as usize);

    let recent = recent_activities(&inputs.activities, source, today, config.recent_activities as usize);

    tracing::debug!(
        %today,
        summaries = inputs.summaries.len(),
        activities = inputs.activities.len(),
        repos = repos.len(),
        "built dashboard"
    );

    Ok(Dashboard {
        as_of: format_date(today),
        cards,
        trends: Trends {
            daily: daily_comparison(&window),
            weekly: period_comparison(&weekly),
            monthly: period_comparison(&monthly),
        },
        weekly,
        monthly,
        heatmap,
        top_repos: repos,
        recent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devpulse_core::PulseError;
    use serde_json::{json, Value};
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    const TODAY: Date = date!(2026 - 10 - 19);

    /// `n` consecutive days ending today; `commits(i)` where 0 is the oldest.
    fn series(n: u32, commits: impl Fn(u32) -> u64) -> Vec<DailySummary> {
        let start = window_start(TODAY, n).unwrap();
        std::iter::successors(Some(start), |d| d.next_day())
            .take(n as usize)
            .enumerate()
            .map(|(i, date)| DailySummary {
                total_commits: commits(i as u32),
                total_prs: 1,
                ..DailySummary::empty(date)
            })
            .collect()
    }

    fn activity(id: &str, source: &str, kind: &str, payload: Value, at: OffsetDateTime) -> ActivityRecord {
        ActivityRecord {
            id: id.to_string(),
            source: source.to_string(),
            kind: kind.to_string(),
            payload: payload.as_object().cloned().unwrap_or_default(),
            occurred_at: at,
        }
    }

    #[test]
    fn commits_doubled_over_sixty_days() {
        let inputs = DashboardInputs {
            summaries: series(60, |i| if i < 30 { 5 } else { 10 }),
            activities: Vec::new(),
        };
        let dash = build_dashboard(&inputs, &DashboardConfig::default(), TODAY).unwrap();
        assert_eq!(dash.cards.commits, StatCard { current: 300, previous: 150, delta: 100 });
        assert_eq!(dash.cards.prs.delta, 0);
        assert_eq!(dash.cards.active_days.current, 30);
        assert_eq!(dash.trends.daily.len(), 30);
        assert!(dash.trends.daily.iter().all(|p| p.commits == 10 && p.prev_commits == 5));
        assert_eq!(dash.as_of, "2026-10-19");
    }

    #[test]
    fn no_previous_activity_reads_as_zero_delta() {
        let inputs = DashboardInputs {
            summaries: series(30, |_| 4),
            activities: Vec::new(),
        };
        let dash = build_dashboard(&inputs, &DashboardConfig::default(), TODAY).unwrap();
        assert_eq!(dash.cards.commits.previous, 0);
        assert_eq!(dash.cards.commits.delta, 0);
        assert_eq!(dash.cards.active_days.delta, 0);
    }

    #[test]
    fn empty_inputs_give_zero_heatmap() {
        let dash = build_dashboard(&DashboardInputs::default(), &DashboardConfig::default(), TODAY).unwrap();
        assert_eq!(dash.heatmap.days.len(), 365);
        assert_eq!(dash.heatmap.active_days, 0);
        assert!(dash.heatmap.days.iter().all(|d| d.level() == 0));
        assert!(dash.weekly.is_empty());
        assert!(dash.top_repos.is_empty());
        assert!(dash.recent.is_empty());
    }

    #[test]
    fn top_repos_truncated_and_recent_filtered() {
        let activities = vec![
            activity("1", "github", "push", json!({"repo": "o/a"}), datetime!(2026-10-18 10:00 UTC)),
            activity("2", "github", "push", json!({"repo": "o/a"}), datetime!(2026-10-17 10:00 UTC)),
            activity("3", "github", "push", json!({"repo": "o/b"}), datetime!(2026-10-16 10:00 UTC)),
            activity("4", "wakatime", "coding", json!({"minutes": 30}), datetime!(2026-10-19 08:00 UTC)),
        ];
        let inputs = DashboardInputs {
            summaries: Vec::new(),
            activities,
        };
        let config = DashboardConfig {
            top_repos: 1,
            source: Some("github".into()),
            ..DashboardConfig::default()
        };
        let dash = build_dashboard(&inputs, &config, TODAY).unwrap();
        assert_eq!(dash.top_repos.len(), 1);
        assert_eq!(dash.top_repos[0].name, "o/a");
        assert_eq!(dash.top_repos[0].count, 2);
        let ids: Vec<&str> = dash.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn nothing_after_today_is_shown() {
        let today = date!(2026 - 03 - 31);
        let summaries = vec![
            DailySummary {
                total_commits: 1,
                ..DailySummary::empty(date!(2026 - 03 - 30))
            },
            DailySummary {
                total_commits: 50,
                ..DailySummary::empty(date!(2026 - 09 - 15))
            },
        ];
        let activities = vec![
            activity("p", "github", "push", json!({"repo": "o/past"}), datetime!(2026-03-30 09:00 UTC)),
            activity("f", "github", "push", json!({"repo": "o/future"}), datetime!(2026-09-15 09:00 UTC)),
        ];
        let inputs = DashboardInputs { summaries, activities };
        let dash = build_dashboard(&inputs, &DashboardConfig::default(), today).unwrap();

        assert_eq!(dash.heatmap.total_count, 1);
        let weeks: Vec<String> = dash.weekly.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(weeks, vec!["2026-W14"]);
        let months: Vec<String> = dash.monthly.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(months, vec!["2026-03"]);
        let repos: Vec<&str> = dash.top_repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(repos, vec!["o/past"]);
        let ids: Vec<&str> = dash.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p"]);
        assert_eq!(dash.cards.commits.current, 1);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = DashboardConfig {
            heatmap_days: 0,
            ..DashboardConfig::default()
        };
        let err = build_dashboard(&DashboardInputs::default(), &config, TODAY).unwrap_err();
        assert!(matches!(err, PulseError::InvalidWindow { name: "heatmapDays", .. }));
    }

    #[test]
    fn periods_limited_to_recent() {
        let inputs = DashboardInputs {
            summaries: series(120, |_| 1),
            activities: Vec::new(),
        };
        let config = DashboardConfig {
            weeks: 4,
            months: 2,
            ..DashboardConfig::default()
        };
        let dash = build_dashboard(&inputs, &config, TODAY).unwrap();
        assert_eq!(dash.weekly.len(), 4);
        assert_eq!(dash.monthly.len(), 2);
        assert_eq!(dash.monthly[1].period.to_string(), "2026-10");
        assert_eq!(dash.trends.monthly.len(), 1);
        assert_eq!(dash.trends.monthly[0].label, "Oct");
    }

    #[test]
    fn serializes_camel_case() {
        let dash = build_dashboard(&DashboardInputs::default(), &DashboardConfig::default(), TODAY).unwrap();
        let value = serde_json::to_value(&dash).unwrap();
        assert!(value.get("asOf").is_some());
        assert!(value.get("topRepos").is_some());
        assert!(value["cards"].get("activeDays").is_some());
    }
}
