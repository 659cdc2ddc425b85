use std::collections::HashMap;

use devpulse_core::config::MAX_DAYS;
use devpulse_core::error::{check_window, PulseError, Result};
use devpulse_core::record::ensure_unique_dates;
use devpulse_core::DailySummary;
use time::{Date, Duration};

/// First day of an inclusive `days`-long window ending on `today`.
pub fn window_start(today: Date, days: u32) -> Result<Date> {
    let back = Duration::days(i64::from(days.saturating_sub(1)));
    today.checked_sub(back).ok_or(PulseError::InvalidWindow {
        name: "window",
        value: u64::from(days),
        max: u64::from(MAX_DAYS),
    })
}

/// Every calendar day of the window, oldest first.
pub fn window_dates(today: Date, days: u32) -> Result<Vec<Date>> {
    let start = window_start(today, days)?;
    Ok(std::iter::successors(Some(start), |d| d.next_day())
        .take_while(|d| *d <= today)
        .collect())
}

/// Densify a sparse daily series into exactly `window` ascending days ending
/// on `today`. Absent days become zero-valued summaries; days outside the
/// window are dropped.
pub fn fill_daily_window(days: &[DailySummary], window: u32, today: Date) -> Result<Vec<DailySummary>> {
    check_window("summaryDays", window, MAX_DAYS)?;
    ensure_unique_dates(days)?;

    let by_date: HashMap<Date, &DailySummary> = days.iter().map(|d| (d.date, d)).collect();
    Ok(window_dates(today, window)?
        .into_iter()
        .map(|date| {
            by_date
                .get(&date)
                .map(|d| (*d).clone())
                .unwrap_or_else(|| DailySummary::empty(date))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day(date: Date, commits: u64) -> DailySummary {
        DailySummary {
            total_commits: commits,
            ..DailySummary::empty(date)
        }
    }

    #[test]
    fn window_dates_inclusive_of_today() {
        let dates = window_dates(date!(2026 - 03 - 02), 3).unwrap();
        assert_eq!(
            dates,
            vec![date!(2026 - 02 - 28), date!(2026 - 03 - 01), date!(2026 - 03 - 02)]
        );
    }

    #[test]
    fn single_day_window_is_today() {
        assert_eq!(window_start(date!(2026 - 10 - 19), 1).unwrap(), date!(2026 - 10 - 19));
    }

    #[test]
    fn fill_zero_fills_gaps_and_drops_outside() {
        let today = date!(2026 - 10 - 19);
        let input = vec![
            day(date!(2026 - 10 - 10), 9), // outside a 5-day window
            day(date!(2026 - 10 - 16), 2),
            day(date!(2026 - 10 - 19), 4),
        ];
        let filled = fill_daily_window(&input, 5, today).unwrap();
        let commits: Vec<u64> = filled.iter().map(|d| d.total_commits).collect();
        assert_eq!(commits, vec![0, 2, 0, 0, 4]);
        assert_eq!(filled[0].date, date!(2026 - 10 - 15));
        assert_eq!(filled[4].date, today);
    }

    #[test]
    fn fill_accepts_unsorted_input() {
        let today = date!(2026 - 10 - 19);
        let input = vec![day(today, 1), day(date!(2026 - 10 - 18), 2)];
        let filled = fill_daily_window(&input, 2, today).unwrap();
        assert_eq!(filled[0].total_commits, 2);
        assert_eq!(filled[1].total_commits, 1);
    }

    #[test]
    fn fill_rejects_zero_window() {
        let err = fill_daily_window(&[], 0, date!(2026 - 10 - 19)).unwrap_err();
        assert!(matches!(err, PulseError::InvalidWindow { name: "summaryDays", .. }));
    }

    #[test]
    fn fill_rejects_duplicate_dates() {
        let today = date!(2026 - 10 - 19);
        let input = vec![day(today, 1), day(today, 2)];
        assert!(matches!(
            fill_daily_window(&input, 3, today),
            Err(PulseError::MalformedRecord { .. })
        ));
    }
}
