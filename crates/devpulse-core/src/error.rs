use thiserror::Error;

/// Errors raised by the aggregation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PulseError {
    /// A window size (days, weeks, months, top-N) outside its accepted range.
    #[error("invalid window: {name} = {value} (expected 1..={max})")]
    InvalidWindow {
        name: &'static str,
        value: u64,
        max: u64,
    },

    /// A record missing a required field, or carrying one that cannot be parsed.
    #[error("malformed record {record}: {reason}")]
    MalformedRecord { record: String, reason: String },

    /// Opaque failure from the data-fetch layer. Never interpreted here.
    #[error(transparent)]
    FetchFailure(#[from] FetchFailure),
}

pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// Reject window sizes of zero or above `max`.
pub fn check_window(name: &'static str, value: u32, max: u32) -> Result<u32> {
    if value == 0 || value > max {
        return Err(PulseError::InvalidWindow {
            name,
            value: u64::from(value),
            max: u64::from(max),
        });
    }
    Ok(value)
}

/// A failed fetch, carrying a human-readable message.
///
/// Built from a non-2xx response via [`FetchFailure::from_response`], which
/// prefers the message inside an `{"error": "..."}` envelope and otherwise
/// falls back to `Request failed: <status>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn from_response(status: u16, body: &str) -> Self {
        let message = envelope_message(body).unwrap_or_else(|| format!("Request failed: {status}"));
        Self {
            status: Some(status),
            message,
        }
    }
}

/// Extract the `error` string from a JSON error envelope, if the body is one.
pub fn envelope_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(|s| s.to_string())
}
