use std::collections::HashSet;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{PulseError, Result};
use crate::types::{parse_date, ActivityRecord, DailySummary};

// ── Field helpers ──

fn required_str<'a>(obj: &'a Value, key: &str, record: &str) -> Result<&'a str> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PulseError::malformed(record, format!("missing field '{key}'")))
}

fn optional_count(obj: &Value, key: &str, record: &str) -> Result<u64> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v.as_u64().ok_or_else(|| {
            PulseError::malformed(record, format!("'{key}' must be a non-negative integer, got {v}"))
        }),
    }
}

// ── Activity records ──

impl ActivityRecord {
    /// Decode one activity from its wire JSON shape.
    ///
    /// `id` may be a string or an integer. `payload` defaults to an empty
    /// object but must be an object when present.
    pub fn from_json(value: &Value, index: usize) -> Result<Self> {
        let fallback = format!("activity[{index}]");
        if !value.is_object() {
            return Err(PulseError::malformed(fallback, "expected a JSON object"));
        }
        let id = match value.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(PulseError::malformed(fallback, "missing field 'id'")),
        };
        let record = format!("activity {id}");

        let source = required_str(value, "source", &record)?.to_string();
        let kind = required_str(value, "type", &record)?.to_string();
        let payload = match value.get("payload") {
            None | Some(Value::Null) => serde_json::Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(PulseError::malformed(&record, "'payload' must be an object")),
        };
        let ts = required_str(value, "occurredAt", &record)?;
        let occurred_at = OffsetDateTime::parse(ts, &Rfc3339)
            .map_err(|e| PulseError::malformed(&record, format!("invalid occurredAt '{ts}': {e}")))?;

        Ok(ActivityRecord {
            id,
            source,
            kind,
            payload,
            occurred_at,
        })
    }
}

pub fn decode_activities(values: &[Value]) -> Result<Vec<ActivityRecord>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| ActivityRecord::from_json(v, i))
        .collect()
}

// ── Daily summaries ──

impl DailySummary {
    /// Decode one daily summary. Missing counts read as zero; negative or
    /// non-integer counts are rejected.
    pub fn from_json(value: &Value, index: usize) -> Result<Self> {
        let record = format!("summary[{index}]");
        let date = parse_date(required_str(value, "date", &record)?)
            .map_err(|e| PulseError::malformed(&record, e.to_string()))?;
        Ok(DailySummary {
            date,
            total_commits: optional_count(value, "totalCommits", &record)?,
            total_prs: optional_count(value, "totalPrs", &record)?,
            coding_minutes: optional_count(value, "codingMinutes", &record)?,
        })
    }
}

pub fn decode_summaries(values: &[Value]) -> Result<Vec<DailySummary>> {
    let summaries = values
        .iter()
        .enumerate()
        .map(|(i, v)| DailySummary::from_json(v, i))
        .collect::<Result<Vec<_>>>()?;
    ensure_unique_dates(&summaries)?;
    Ok(summaries)
}

/// Daily series must not repeat a date.
pub fn ensure_unique_dates(days: &[DailySummary]) -> Result<()> {
    let mut seen = HashSet::with_capacity(days.len());
    for day in days {
        if !seen.insert(day.date) {
            return Err(PulseError::malformed(
                crate::types::format_date(day.date),
                "duplicate date in daily series",
            ));
        }
    }
    Ok(())
}
