use devpulse_aggregate::{HeatmapGrid, StatCard};
use devpulse_core::{ActivityRecord, ComparisonPoint, RepoStats};
use time::OffsetDateTime;

// ── Relative time ──

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// "just now", "5 minutes ago", "3 hours ago", "2 days ago", "4 months ago".
/// Months are 30-day blocks.
pub fn relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - then).whole_seconds();
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;
    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        plural(mins, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else {
        plural(days / 30, "month")
    }
}

// ── Widgets ──

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Heatmap as seven text rows (one per weekday), one column per week.
pub fn heatmap(grid: &HeatmapGrid) -> String {
    let weeks = grid.weeks();
    let mut out = String::new();
    for row in 0..7 {
        for week in &weeks {
            let glyph = match week.get(row) {
                Some(Some(day)) => LEVEL_GLYPHS[day.level() as usize],
                _ => ' ',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{} active days, {} commits (max {} in a day)\n",
        grid.active_days, grid.total_count, grid.max_count
    ));
    out
}

pub fn stat_card(title: &str, card: &StatCard) -> String {
    format!(
        "{title:<14} {:>6}  ({:+}% vs {})",
        card.current, card.delta, card.previous
    )
}

pub fn comparison(points: &[ComparisonPoint]) -> String {
    if points.is_empty() {
        return "(no data)\n".to_string();
    }
    let mut out = format!("{:<8} {:>8} {:>8} {:>6}\n", "period", "commits", "previous", "prs");
    for p in points {
        out.push_str(&format!(
            "{:<8} {:>8} {:>8} {:>6}\n",
            p.label, p.commits, p.prev_commits, p.prs
        ));
    }
    out
}

pub fn repos(repos: &[RepoStats]) -> String {
    if repos.is_empty() {
        return "No repository data yet.\n".to_string();
    }
    repos
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:>2}. {:<40} {:>5}\n", i + 1, r.name, r.count))
        .collect()
}

pub fn timeline(records: &[ActivityRecord], now: OffsetDateTime) -> String {
    if records.is_empty() {
        return "No recent activity.\n".to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{:<13} {:<30} {}\n",
                r.kind,
                r.repo().unwrap_or("-"),
                relative_time(r.occurred_at, now)
            )
        })
        .collect()
}
