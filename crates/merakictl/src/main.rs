mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meraki_core::Dashboard;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a dashboard session
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        // All other commands discover the fleet first
        cmd => {
            let dashboard_config = config::build_dashboard_config(&cli.global)?;
            let mut dashboard = Dashboard::new(&dashboard_config)?;

            if !dashboard.login().await {
                return Err(CliError::LoginFailed);
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut dashboard, &cli.global).await
        }
    }
}
