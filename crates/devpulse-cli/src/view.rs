use std::path::{Path, PathBuf};

use clap::Args;
use devpulse_aggregate::DashboardInputs;
use devpulse_core::{parse_date, DashboardConfig};
use time::{Date, OffsetDateTime};

use crate::cmd_config;
use crate::source::DataDir;

/// Flags shared by every view command.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Directory with summaries.json and activities.json (relative to the workspace)
    #[arg(long, default_value = ".devpulse/data")]
    pub data: PathBuf,
    /// Render as of this date (YYYY-MM-DD, default: today in UTC)
    #[arg(long)]
    pub today: Option<String>,
    /// Restrict activity widgets to one source (github, wakatime, all)
    #[arg(long)]
    pub source: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolved settings for one view invocation.
pub struct View {
    pub config: DashboardConfig,
    pub today: Date,
    pub data: DataDir,
    pub json: bool,
}

impl View {
    /// Config file under `repo_root`, with flags layered on top.
    pub fn resolve(repo_root: &Path, args: &ViewArgs) -> anyhow::Result<Self> {
        let mut config = cmd_config::load(repo_root)?;
        if let Some(source) = &args.source {
            config.source = Some(source.clone());
        }
        let today = match &args.today {
            Some(s) => parse_date(s)?,
            None => OffsetDateTime::now_utc().date(),
        };
        Ok(Self {
            config,
            today,
            data: DataDir::new(repo_root.join(&args.data)),
            json: args.json,
        })
    }

    pub fn inputs(&self) -> anyhow::Result<DashboardInputs> {
        self.data
            .load()
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", self.data.root().display()))
    }

    /// Reference instant for relative timestamps: now, or end of `--today`.
    pub fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        if now.date() == self.today {
            now
        } else {
            self.today.with_hms(23, 59, 59).map_or(now, |dt| dt.assume_utc())
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
