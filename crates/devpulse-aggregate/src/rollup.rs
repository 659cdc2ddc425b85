use std::collections::BTreeMap;

use devpulse_core::error::{PulseError, Result};
use devpulse_core::{activity_kind, ActivityRecord, DailySummary, RepoStats};
use serde_json::Value;
use time::Date;

use crate::ranking::rank_entities;

// ── Payload readers ──

/// Provider event body nested under `payload.payload`.
fn event_body(record: &ActivityRecord) -> Option<&Value> {
    record.payload.get("payload")
}

/// Commits carried by a push: `size`, else the length of `commits`, else 1.
pub fn push_commits(record: &ActivityRecord) -> u64 {
    let body = event_body(record);
    if let Some(size) = body.and_then(|b| b.get("size")).and_then(|v| v.as_u64()) {
        return size;
    }
    body.and_then(|b| b.get("commits"))
        .and_then(|v| v.as_array())
        .map(|arr| arr.len() as u64)
        .unwrap_or(1)
}

/// A pull request counts when it is opened (or the action is unknown).
pub fn opens_pull_request(record: &ActivityRecord) -> bool {
    let action = event_body(record)
        .and_then(|b| b.get("action"))
        .or_else(|| record.payload.get("action"))
        .and_then(|v| v.as_str());
    matches!(action, None | Some("opened"))
}

fn coding_minutes(record: &ActivityRecord) -> u64 {
    record
        .payload
        .get("minutes")
        .and_then(|v| v.as_u64())
        .unwrap_or(0)
}

/// Activity kinds that must name a repository.
fn is_repo_scoped(kind: &str) -> bool {
    matches!(
        kind,
        activity_kind::PUSH | activity_kind::PULL_REQUEST | activity_kind::REVIEW | activity_kind::CREATE
    )
}

// ── Daily rollup ──

/// Roll activity records up into one summary per UTC day, oldest first.
/// Days without activity are not emitted.
pub fn rollup_daily(activities: &[ActivityRecord], source: Option<&str>) -> Vec<DailySummary> {
    let mut days: BTreeMap<Date, DailySummary> = BTreeMap::new();
    for record in activities.iter().filter(|r| r.matches_source(source)) {
        let day = days
            .entry(record.day())
            .or_insert_with(|| DailySummary::empty(record.day()));
        match record.kind.as_str() {
            activity_kind::PUSH => day.total_commits += push_commits(record),
            activity_kind::PULL_REQUEST => {
                if opens_pull_request(record) {
                    day.total_prs += 1;
                }
            }
            activity_kind::CODING => day.coding_minutes += coding_minutes(record),
            _ => {}
        }
    }
    tracing::debug!(records = activities.len(), days = days.len(), "rolled up daily summaries");
    days.into_values().collect()
}

// ── Repository ranking ──

/// One counted entry per repository-scoped record dated `since..=until`.
///
/// Records whose kind carries no repository (coding time, for instance) are
/// skipped; a repository-scoped record without `payload.repo` is malformed.
pub fn tally_repos(
    activities: &[ActivityRecord],
    since: Date,
    until: Date,
    source: Option<&str>,
) -> Result<Vec<RepoStats>> {
    let mut entries = Vec::new();
    for record in activities {
        let day = record.day();
        if !record.matches_source(source) || day < since || day > until {
            continue;
        }
        match record.repo() {
            Some(name) => entries.push(RepoStats {
                name: name.to_string(),
                count: 1,
                last_active: record.occurred_at,
            }),
            None if is_repo_scoped(&record.kind) => {
                return Err(PulseError::malformed(
                    format!("activity {}", record.id),
                    format!("'{}' activity without payload.repo", record.kind),
                ));
            }
            None => {}
        }
    }
    Ok(entries)
}

/// Repositories ranked by activity count over `since..=until`.
pub fn top_repos(
    activities: &[ActivityRecord],
    since: Date,
    until: Date,
    source: Option<&str>,
) -> Result<Vec<RepoStats>> {
    Ok(rank_entities(tally_repos(activities, since, until, source)?))
}

/// The `limit` newest records dated on or before `until`, newest first.
pub fn recent_activities(
    activities: &[ActivityRecord],
    source: Option<&str>,
    until: Date,
    limit: usize,
) -> Vec<ActivityRecord> {
    let mut recent: Vec<ActivityRecord> = activities
        .iter()
        .filter(|r| r.matches_source(source) && r.day() <= until)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    recent.truncate(limit);
    recent
}
