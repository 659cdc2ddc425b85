use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, OffsetDateTime};

use crate::error::{PulseError, Result};
use crate::period::PeriodKey;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Well-known activity type names.
pub mod activity_kind {
    pub const PUSH: &str = "push";
    pub const PULL_REQUEST: &str = "pull_request";
    pub const REVIEW: &str = "review";
    pub const CREATE: &str = "create";
    pub const CODING: &str = "coding";
}

/// Well-known provider names.
pub mod source {
    pub const GITHUB: &str = "github";
    pub const WAKATIME: &str = "wakatime";
}

/// A single activity event as delivered by a provider.
///
/// Serialize-only; inbound JSON goes through [`ActivityRecord::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Map<String, Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl ActivityRecord {
    /// Repository the activity belongs to (`payload.repo`).
    pub fn repo(&self) -> Option<&str> {
        self.payload.get("repo").and_then(|v| v.as_str())
    }

    /// UTC calendar day the activity happened on.
    pub fn day(&self) -> Date {
        self.occurred_at.to_offset(time::UtcOffset::UTC).date()
    }

    pub fn matches_source(&self, filter: Option<&str>) -> bool {
        filter.map_or(true, |s| self.source == s)
    }
}

/// Fields shared by daily and period summaries.
pub trait Summary {
    fn total_commits(&self) -> u64;
    fn total_prs(&self) -> u64;
    fn coding_minutes(&self) -> u64;
}

/// Per-day totals. Days with no activity may be absent or zero-valued.
/// Decoded with [`DailySummary::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub total_commits: u64,
    pub total_prs: u64,
    pub coding_minutes: u64,
}

impl DailySummary {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            total_commits: 0,
            total_prs: 0,
            coding_minutes: 0,
        }
    }

    /// A day counts as active when it has at least one commit or PR.
    pub fn is_active(&self) -> bool {
        self.total_commits > 0 || self.total_prs > 0
    }
}

impl Summary for DailySummary {
    fn total_commits(&self) -> u64 {
        self.total_commits
    }
    fn total_prs(&self) -> u64 {
        self.total_prs
    }
    fn coding_minutes(&self) -> u64 {
        self.coding_minutes
    }
}

/// Totals for one week or month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: PeriodKey,
    pub total_commits: u64,
    pub total_prs: u64,
    pub coding_minutes: u64,
}

impl PeriodSummary {
    pub fn empty(period: PeriodKey) -> Self {
        Self {
            period,
            total_commits: 0,
            total_prs: 0,
            coding_minutes: 0,
        }
    }

    pub fn add(&mut self, day: &DailySummary) {
        self.total_commits += day.total_commits;
        self.total_prs += day.total_prs;
        self.coding_minutes += day.coding_minutes;
    }
}

impl Summary for PeriodSummary {
    fn total_commits(&self) -> u64 {
        self.total_commits
    }
    fn total_prs(&self) -> u64 {
        self.total_prs
    }
    fn coding_minutes(&self) -> u64 {
        self.coding_minutes
    }
}

/// Inclusive upper bounds for heatmap levels 1, 2 and 3.
///
/// A count of zero is always level 0 and anything above the last bound is
/// level 4, so the mapping is monotone in count by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u64; 3]", into = "[u64; 3]")]
pub struct LevelThresholds([u64; 3]);

impl LevelThresholds {
    pub const MAX_LEVEL: u8 = 4;

    pub fn new(bounds: [u64; 3]) -> Result<Self> {
        let [a, b, c] = bounds;
        if a == 0 || a >= b || b >= c {
            return Err(PulseError::malformed(
                "levelThresholds",
                format!("bounds must be strictly ascending and positive, got {bounds:?}"),
            ));
        }
        Ok(Self(bounds))
    }

    pub fn bounds(&self) -> [u64; 3] {
        self.0
    }

    pub fn level(&self, count: u64) -> u8 {
        if count == 0 {
            return 0;
        }
        let below = self.0.iter().filter(|&&bound| count > bound).count();
        1 + below as u8
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self([3, 9, 19])
    }
}

impl TryFrom<[u64; 3]> for LevelThresholds {
    type Error = PulseError;

    fn try_from(bounds: [u64; 3]) -> Result<Self> {
        Self::new(bounds)
    }
}

impl From<LevelThresholds> for [u64; 3] {
    fn from(t: LevelThresholds) -> Self {
        t.0
    }
}

/// One heatmap cell. The level is derived from the count on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDay {
    #[serde(with = "calendar_date")]
    date: Date,
    level: u8,
    count: u64,
}

impl HeatmapDay {
    pub fn new(date: Date, count: u64, thresholds: &LevelThresholds) -> Self {
        Self {
            date,
            level: thresholds.level(count),
            count,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// A ranked resource (repository) with its merged activity count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    pub name: String,
    pub count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_active: OffsetDateTime,
}

/// One x-axis position of an overlay chart: current metrics plus the
/// matching previous-period commit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    pub label: String,
    pub commits: u64,
    pub prs: u64,
    pub prev_commits: u64,
}

// ── Date helpers ──

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<Date> {
    Date::parse(s, time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|e| PulseError::malformed(s, format!("invalid date: {e}")))
}
