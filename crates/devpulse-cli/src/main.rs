mod cmd_config;
mod cmd_dashboard;
mod cmd_delta;
mod cmd_heatmap;
mod cmd_rollup;
mod cmd_top_repos;
mod cmd_trends;
mod render;
mod source;
mod view;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd_config::ConfigCmd;
use cmd_trends::Scale;
use view::ViewArgs;

#[derive(Parser)]
#[command(name = "devpulse", version, about = "Developer activity dashboard")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full dashboard: stat cards, heatmap, trends, repos, timeline
    Dashboard {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Contribution heatmap ending today
    Heatmap {
        #[command(flatten)]
        view: ViewArgs,
        /// Number of days (default: heatmapDays from config)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Current-vs-previous comparison series
    Trends {
        #[command(flatten)]
        view: ViewArgs,
        /// Series granularity
        #[arg(long, value_enum, default_value = "weekly")]
        scale: Scale,
        /// Window size in days, weeks or months (default: from config)
        #[arg(long)]
        count: Option<u32>,
    },
    /// Most active repositories
    TopRepos {
        #[command(flatten)]
        view: ViewArgs,
        /// Look-back in days (default: repoDays from config)
        #[arg(long)]
        days: Option<u32>,
        /// Maximum repositories to show (default: topRepos from config)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Roll activity records up into daily summaries
    Rollup {
        #[command(flatten)]
        view: ViewArgs,
        /// Replace summaries.json in the data directory with the result
        #[arg(long)]
        write: bool,
    },
    /// Percentage change between two values
    Delta {
        /// Current value
        current: u64,
        /// Previous value
        previous: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage dashboard config (.devpulse/config.json)
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DEVPULSE_LOG")
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;

    match cli.cmd {
        Command::Dashboard { view } => cmd_dashboard::execute(&repo_root, &view),
        Command::Heatmap { view, days } => cmd_heatmap::execute(&repo_root, &view, days),
        Command::Trends { view, scale, count } => cmd_trends::execute(&repo_root, &view, scale, count),
        Command::TopRepos { view, days, limit } => cmd_top_repos::execute(&repo_root, &view, days, limit),
        Command::Rollup { view, write } => cmd_rollup::execute(&repo_root, &view, write),
        Command::Delta {
            current,
            previous,
            json,
        } => cmd_delta::execute(current, previous, json),
        Command::Config { cmd } => cmd_config::run(cmd, &repo_root),
    }
}
