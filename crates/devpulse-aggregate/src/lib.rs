pub mod compare;
pub mod dashboard;
pub mod delta;
pub mod heatmap;
pub mod labels;
pub mod period;
pub mod ranking;
pub mod rollup;
pub mod window;

pub use compare::{build_comparison, daily_comparison, period_comparison, split_halves};
pub use dashboard::{build_dashboard, summary_cards, Dashboard, DashboardInputs, StatCard, SummaryCards, Trends};
pub use delta::percent_delta;
pub use heatmap::{build_heatmap, HeatmapGrid, HeatmapOptions};
pub use period::{aggregate_periods, recent_periods, window_first_key};
pub use ranking::rank_entities;
pub use rollup::{recent_activities, rollup_daily, tally_repos, top_repos};
pub use window::{fill_daily_window, window_dates, window_start};
