use std::collections::BTreeMap;

use devpulse_core::config::{MAX_MONTHS, MAX_WEEKS};
use devpulse_core::error::{check_window, Result};
use devpulse_core::record::ensure_unique_dates;
use devpulse_core::{DailySummary, Granularity, PeriodKey, PeriodSummary};
use time::Date;

use crate::window::window_start;

/// Bucket daily summaries into weeks or months.
///
/// Emits one summary per period that contains at least one input day, in
/// chronological key order. Input order does not matter; repeated dates are
/// rejected.
pub fn aggregate_periods(days: &[DailySummary], granularity: Granularity) -> Result<Vec<PeriodSummary>> {
    ensure_unique_dates(days)?;

    let mut buckets: BTreeMap<PeriodKey, PeriodSummary> = BTreeMap::new();
    for day in days {
        let key = PeriodKey::for_date(day.date, granularity);
        buckets
            .entry(key)
            .or_insert_with(|| PeriodSummary::empty(key))
            .add(day);
    }

    tracing::debug!(%granularity, days = days.len(), periods = buckets.len(), "aggregated periods");
    Ok(buckets.into_values().collect())
}

/// Earliest key of a `count`-period window whose last period contains `today`.
pub fn window_first_key(today: Date, granularity: Granularity, count: u32) -> Result<PeriodKey> {
    let back = count.saturating_sub(1);
    match granularity {
        Granularity::Weekly => {
            let start = window_start(today, back.saturating_mul(7).saturating_add(1))?;
            Ok(PeriodKey::for_date(start, granularity))
        }
        Granularity::Monthly => {
            let months = i64::from(today.year()) * 12 + i64::from(u8::from(today.month())) - 1 - i64::from(back);
            Ok(PeriodKey::Month {
                year: months.div_euclid(12) as i32,
                month: (months.rem_euclid(12) + 1) as u8,
            })
        }
    }
}

/// Periods of the last `count` weeks or months ending with the one that
/// contains `today`, oldest first.
///
/// Days after `today` are ignored. Periods inside the window with no input
/// day are not emitted.
pub fn recent_periods(
    days: &[DailySummary],
    granularity: Granularity,
    count: u32,
    today: Date,
) -> Result<Vec<PeriodSummary>> {
    match granularity {
        Granularity::Weekly => check_window("weeks", count, MAX_WEEKS)?,
        Granularity::Monthly => check_window("months", count, MAX_MONTHS)?,
    };
    ensure_unique_dates(days)?;
    let first = window_first_key(today, granularity, count)?;
    let in_window: Vec<DailySummary> = days
        .iter()
        .filter(|d| d.date <= today && PeriodKey::for_date(d.date, granularity) >= first)
        .cloned()
        .collect();
    aggregate_periods(&in_window, granularity)
}
