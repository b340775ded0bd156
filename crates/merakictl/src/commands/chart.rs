//! Latency chart rendering command.

use meraki_core::{Dashboard, PngChartRenderer};

use crate::cli::{ChartArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    dashboard: &mut Dashboard,
    args: &ChartArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let renderer = PngChartRenderer::new(&args.out_dir);
    let artifacts = dashboard.render_uplink_charts(&renderer, &args.device).await;

    if artifacts.is_empty() {
        output::notice(
            &format!("No charts rendered for '{}'", args.device),
            &global.color,
            global.quiet,
        );
        return Ok(());
    }

    let paths: Vec<String> = artifacts
        .iter()
        .map(|name| args.out_dir.join(name).display().to_string())
        .collect();
    output::print_output(&paths.join("\n"), global.quiet);
    Ok(())
}
