use std::path::Path;

use devpulse_aggregate::{build_dashboard, Dashboard};

use crate::render;
use crate::view::{print_json, View, ViewArgs};

/// `devpulse dashboard`
pub fn execute(repo_root: &Path, args: &ViewArgs) -> anyhow::Result<()> {
    let view = View::resolve(repo_root, args)?;
    let inputs = view.inputs()?;
    let dashboard = build_dashboard(&inputs, &view.config, view.today)?;

    if view.json {
        return print_json(&dashboard);
    }
    print!("{}", render_text(&dashboard, &view));
    Ok(())
}

fn render_text(d: &Dashboard, view: &View) -> String {
    let half = view.config.summary_days - view.config.summary_days / 2;
    let mut out = format!("DevPulse as of {}  (last {half} days vs previous)\n\n", d.as_of);
    out.push_str(&render::stat_card("Commits", &d.cards.commits));
    out.push('\n');
    out.push_str(&render::stat_card("Pull requests", &d.cards.prs));
    out.push('\n');
    out.push_str(&render::stat_card("Active days", &d.cards.active_days));
    out.push('\n');
    out.push_str(&render::stat_card("Coding mins", &d.cards.coding_minutes));
    out.push_str("\n\n── Activity ──\n");
    out.push_str(&render::heatmap(&d.heatmap));
    out.push_str("\n── Weekly ──\n");
    out.push_str(&render::comparison(&d.trends.weekly));
    out.push_str("\n── Monthly ──\n");
    out.push_str(&render::comparison(&d.trends.monthly));
    out.push_str("\n── Top repositories ──\n");
    out.push_str(&render::repos(&d.top_repos));
    out.push_str("\n── Recent activity ──\n");
    out.push_str(&render::timeline(&d.recent, view.now()));
    out
}
