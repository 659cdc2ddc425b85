use std::path::{Path, PathBuf};

use devpulse_aggregate::DashboardInputs;
use devpulse_core::error::{envelope_message, Result};
use devpulse_core::record::{decode_activities, decode_summaries};
use devpulse_core::{ActivityRecord, DailySummary, FetchFailure};
use serde_json::Value;

pub const SUMMARIES_FILE: &str = "summaries.json";
pub const ACTIVITIES_FILE: &str = "activities.json";

/// Directory holding exported API responses (`summaries.json`,
/// `activities.json`).
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn summaries(&self) -> Result<Vec<DailySummary>> {
        let items = fetch_list(&self.root.join(SUMMARIES_FILE), "summaries")?;
        decode_summaries(&items)
    }

    pub fn activities(&self) -> Result<Vec<ActivityRecord>> {
        let items = fetch_list(&self.root.join(ACTIVITIES_FILE), "activities")?;
        decode_activities(&items)
    }

    /// Gather every input for a dashboard render. Any one failure fails the
    /// whole load.
    pub fn load(&self) -> Result<DashboardInputs> {
        let summaries = self.summaries()?;
        let activities = self.activities()?;
        tracing::debug!(
            dir = %self.root.display(),
            summaries = summaries.len(),
            activities = activities.len(),
            "loaded inputs"
        );
        Ok(DashboardInputs { summaries, activities })
    }
}

/// Read one response body and pull the array stored under `key`.
///
/// The body may be the bare array or the `{ "<key>": [...] }` response shape.
/// An `{ "error": "..." }` body surfaces as a fetch failure with that message.
fn fetch_list(path: &Path, key: &str) -> std::result::Result<Vec<Value>, FetchFailure> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| FetchFailure::new(format!("cannot read {}: {e}", path.display())))?;
    if let Some(message) = envelope_message(&body) {
        return Err(FetchFailure::new(message));
    }
    let value: Value = serde_json::from_str(&body)
        .map_err(|e| FetchFailure::new(format!("invalid JSON in {}: {e}", path.display())))?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            _ => Err(FetchFailure::new(format!(
                "{}: expected a '{key}' array",
                path.display()
            ))),
        },
        _ => Err(FetchFailure::new(format!("{}: expected a JSON object", path.display()))),
    }
}
