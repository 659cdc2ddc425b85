use std::collections::HashMap;

use devpulse_core::config::MAX_DAYS;
use devpulse_core::error::{check_window, Result};
use devpulse_core::{HeatmapDay, LevelThresholds, WeekStart};
use serde::Serialize;
use time::Date;

use crate::window::window_dates;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatmapOptions {
    pub thresholds: LevelThresholds,
    pub week_start: WeekStart,
}

/// A contiguous calendar of heatmap cells ending today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapGrid {
    pub days: Vec<HeatmapDay>,
    /// Empty cells a renderer places before the first day so that every
    /// column is one full week.
    pub padding: u8,
    pub active_days: usize,
    pub total_count: u64,
    pub max_count: u64,
}

impl HeatmapGrid {
    /// Cells grouped into weeks, with `None` for the leading padding.
    pub fn weeks(&self) -> Vec<Vec<Option<&HeatmapDay>>> {
        let padded: Vec<Option<&HeatmapDay>> = std::iter::repeat(None)
            .take(self.padding as usize)
            .chain(self.days.iter().map(Some))
            .collect();
        padded.chunks(7).map(|w| w.to_vec()).collect()
    }
}

/// Map sparse `(date, count)` pairs onto a `window_days`-long calendar ending
/// on `today`.
///
/// Missing days read as zero, counts outside the window are ignored and
/// repeated dates are summed. A zero or oversized window is rejected.
pub fn build_heatmap<I>(counts: I, window_days: u32, today: Date, options: &HeatmapOptions) -> Result<HeatmapGrid>
where
    I: IntoIterator<Item = (Date, u64)>,
{
    check_window("heatmapDays", window_days, MAX_DAYS)?;
    let dates = window_dates(today, window_days)?;
    let start = dates[0];

    let mut by_day: HashMap<Date, u64> = HashMap::new();
    let mut outside = 0usize;
    for (date, count) in counts {
        if date < start || date > today {
            outside += 1;
            continue;
        }
        *by_day.entry(date).or_insert(0) += count;
    }
    if outside > 0 {
        tracing::debug!(outside, %start, %today, "heatmap: ignored counts outside window");
    }

    let days: Vec<HeatmapDay> = dates
        .into_iter()
        .map(|date| {
            let count = by_day.get(&date).copied().unwrap_or(0);
            HeatmapDay::new(date, count, &options.thresholds)
        })
        .collect();

    let active_days = days.iter().filter(|d| d.count() > 0).count();
    let total_count = days.iter().map(|d| d.count()).sum();
    let max_count = days.iter().map(|d| d.count()).max().unwrap_or(0);

    Ok(HeatmapGrid {
        padding: options.week_start.offset(start.weekday()),
        days,
        active_days,
        total_count,
        max_count,
    })
}
