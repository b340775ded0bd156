//! Command dispatch: bridges CLI args -> dashboard queries -> output.

pub mod chart;
pub mod config_cmd;
pub mod orgs;
pub mod top_talkers;
pub mod uplink;

use meraki_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &mut Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Orgs => orgs::handle(dashboard, global),
        Command::Uplink(args) => uplink::handle(dashboard, &args, global).await,
        Command::TopTalkers(args) => top_talkers::handle(dashboard, &args, global).await,
        Command::Chart(args) => chart::handle(dashboard, &args, global).await,
        // Normally handled before a dashboard session is built; kept
        // here so every command has a total dispatch path.
        Command::Config(args) => config_cmd::handle(&args, global),
    }
}
