pub mod config;
pub mod error;
pub mod period;
pub mod record;
pub mod types;

pub use config::{DashboardConfig, WeekStart};
pub use error::{FetchFailure, PulseError, Result};
pub use period::{Granularity, PeriodKey};
pub use types::*;
