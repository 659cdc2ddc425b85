use devpulse_core::{ComparisonPoint, DailySummary, PeriodSummary, Summary};

use crate::labels;

/// Split an ordered series into `(previous, current)`, where previous holds
/// the first `len / 2` items and current the rest.
pub fn split_halves<T>(series: &[T]) -> (&[T], &[T]) {
    series.split_at(series.len() / 2)
}

/// Pair each entry of the current half with the same position in the
/// previous half.
///
/// The series must already be oldest first; nothing is reordered here. The
/// result has one point per current entry, and `prev_commits` is zero where
/// the previous half runs out.
pub fn build_comparison<T, F>(series: &[T], label: F) -> Vec<ComparisonPoint>
where
    T: Summary,
    F: Fn(&T) -> String,
{
    let (previous, current) = split_halves(series);
    current
        .iter()
        .enumerate()
        .map(|(i, item)| ComparisonPoint {
            label: label(item),
            commits: item.total_commits(),
            prs: item.total_prs(),
            prev_commits: previous.get(i).map_or(0, |p| p.total_commits()),
        })
        .collect()
}

pub fn daily_comparison(days: &[DailySummary]) -> Vec<ComparisonPoint> {
    build_comparison(days, |d| labels::day_label(d.date))
}

pub fn period_comparison(periods: &[PeriodSummary]) -> Vec<ComparisonPoint> {
    build_comparison(periods, |p| labels::period_label(&p.period))
}
