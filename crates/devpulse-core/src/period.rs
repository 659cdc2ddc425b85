use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, Weekday};

use crate::error::{PulseError, Result};

/// Bucket size for period rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Weekly => f.write_str("weekly"),
            Granularity::Monthly => f.write_str("monthly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "weekly" | "week" => Ok(Granularity::Weekly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            other => Err(PulseError::malformed(
                "granularity",
                format!("unknown granularity '{other}' (expected weekly or monthly)"),
            )),
        }
    }
}

/// Identifies one week (ISO-8601) or one calendar month.
///
/// Ordering is chronological: `(year, index)` compared as integers, so
/// `2025-W52 < 2026-W01` and `2025-12 < 2026-01` regardless of how the
/// labels would sort as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Week { year: i32, week: u8 },
    Month { year: i32, month: u8 },
}

impl PeriodKey {
    /// Key of the period containing `date`. Weeks use the ISO week-numbering
    /// year, so 2024-12-30 belongs to `2025-W01`.
    pub fn for_date(date: Date, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Weekly => {
                let (year, week, _) = date.to_iso_week_date();
                PeriodKey::Week { year, week }
            }
            Granularity::Monthly => PeriodKey::Month {
                year: date.year(),
                month: u8::from(date.month()),
            },
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            PeriodKey::Week { .. } => Granularity::Weekly,
            PeriodKey::Month { .. } => Granularity::Monthly,
        }
    }

    pub fn year(&self) -> i32 {
        match *self {
            PeriodKey::Week { year, .. } | PeriodKey::Month { year, .. } => year,
        }
    }

    /// Week number (1–53) or month number (1–12).
    pub fn index(&self) -> u8 {
        match *self {
            PeriodKey::Week { week, .. } => week,
            PeriodKey::Month { month, .. } => month,
        }
    }

    /// First calendar day of the period (Monday for weeks).
    pub fn start_date(&self) -> Result<Date> {
        let date = match *self {
            PeriodKey::Week { year, week } => Date::from_iso_week_date(year, week, Weekday::Monday),
            PeriodKey::Month { year, month } => {
                let month = Month::try_from(month)
                    .map_err(|e| PulseError::malformed(self.to_string(), e.to_string()))?;
                Date::from_calendar_date(year, month, 1)
            }
        };
        date.map_err(|e| PulseError::malformed(self.to_string(), e.to_string()))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Week { year, week } => write!(f, "{year:04}-W{week:02}"),
            PeriodKey::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = PulseError;

    /// Parses `YYYY-Www` or `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = |reason: &str| PulseError::malformed(s, reason.to_string());
        let (year, rest) = s.split_once('-').ok_or_else(|| bad("missing '-'"))?;
        let year: i32 = year.parse().map_err(|_| bad("invalid year"))?;

        if let Some(week) = rest.strip_prefix('W') {
            let week: u8 = week.parse().map_err(|_| bad("invalid week number"))?;
            let key = PeriodKey::Week { year, week };
            // Rejects week 53 in years that only have 52.
            key.start_date().map_err(|_| bad("week out of range"))?;
            return Ok(key);
        }

        let month: u8 = rest.parse().map_err(|_| bad("invalid month number"))?;
        if !(1..=12).contains(&month) {
            return Err(bad("month out of range"));
        }
        Ok(PeriodKey::Month { year, month })
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
