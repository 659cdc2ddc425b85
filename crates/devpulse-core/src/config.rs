use serde::{Deserialize, Serialize};
use time::Weekday;

use crate::error::{check_window, Result};
use crate::types::LevelThresholds;

pub const MAX_DAYS: u32 = 366;
pub const MAX_WEEKS: u32 = 53;
pub const MAX_MONTHS: u32 = 24;
pub const MAX_TOP_REPOS: u32 = 100;
pub const MAX_RECENT: u32 = 100;

/// Column that starts a calendar week in the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Position of `day` within a week starting on `self` (0–6).
    pub fn offset(self, day: Weekday) -> u8 {
        match self {
            WeekStart::Sunday => day.number_days_from_sunday(),
            WeekStart::Monday => day.number_days_from_monday(),
        }
    }
}

/// Window sizes and knobs for one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Heatmap length in days, ending today.
    pub heatmap_days: u32,
    /// Daily summary window; split in half for period-over-period cards.
    pub summary_days: u32,
    pub weeks: u32,
    pub months: u32,
    /// Look-back for repository ranking.
    pub repo_days: u32,
    pub top_repos: u32,
    pub recent_activities: u32,
    /// Restrict activity-derived widgets to one provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub level_thresholds: LevelThresholds,
    pub week_start: WeekStart,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            heatmap_days: 365,
            summary_days: 60,
            weeks: 24,
            months: 24,
            repo_days: 30,
            top_repos: 10,
            recent_activities: 20,
            source: None,
            level_thresholds: LevelThresholds::default(),
            week_start: WeekStart::Sunday,
        }
    }
}

impl DashboardConfig {
    /// Check every window against its accepted range.
    pub fn validate(&self) -> Result<()> {
        check_window("heatmapDays", self.heatmap_days, MAX_DAYS)?;
        check_window("summaryDays", self.summary_days, MAX_DAYS)?;
        check_window("weeks", self.weeks, MAX_WEEKS)?;
        check_window("months", self.months, MAX_MONTHS)?;
        check_window("repoDays", self.repo_days, MAX_DAYS)?;
        check_window("topRepos", self.top_repos, MAX_TOP_REPOS)?;
        check_window("recentActivities", self.recent_activities, MAX_RECENT)?;
        Ok(())
    }

    /// Source filter with the "all" sentinel treated as no filter.
    pub fn source_filter(&self) -> Option<&str> {
        self.source
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
    }
}
