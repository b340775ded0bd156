//! Clap derive structures for the `merakictl` CLI.
//!
//! Defines the command tree, global flags, and shared option enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use meraki_core::{DEFAULT_PROBE_IP, DEFAULT_TIMESPAN_SECS, DEFAULT_UPLINK};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// merakictl -- read-only reporting over Meraki cloud-managed networks
#[derive(Debug, Parser)]
#[command(
    name = "merakictl",
    version,
    about = "Report on Meraki organizations from the command line",
    long_about = "Read-only reporting client for the Meraki Dashboard API.\n\n\
        Discovers every organization the API key can see, then reports\n\
        uplink loss/latency, per-client usage, and latency charts for the\n\
        MX security appliances in the fleet.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "MERAKI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Dashboard API key
    #[arg(long, env = "MERAKI_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Dashboard base URL (overrides profile)
    #[arg(long, env = "MERAKI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MERAKI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates (intercepting proxies)
    #[arg(long, short = 'k', env = "MERAKI_INSECURE", global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MERAKI_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List discovered organizations, networks, and devices
    #[command(alias = "o")]
    Orgs,

    /// Report uplink loss/latency for every security appliance
    #[command(alias = "up")]
    Uplink(UplinkArgs),

    /// Rank clients by usage behind each security appliance
    #[command(name = "top-talkers", alias = "top")]
    TopTalkers(TopTalkersArgs),

    /// Render uplink latency charts for a named device
    Chart(ChartArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ── Per-Command Args ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UplinkArgs {
    /// Probe target IP for loss/latency history
    #[arg(long, default_value = DEFAULT_PROBE_IP)]
    pub ip: String,

    /// Lookback window in seconds
    #[arg(long, default_value_t = DEFAULT_TIMESPAN_SECS)]
    pub timespan: u64,

    /// Uplink interface to query
    #[arg(long, default_value = DEFAULT_UPLINK)]
    pub uplink: String,
}

#[derive(Debug, Args)]
pub struct TopTalkersArgs {
    /// Lookback window in seconds
    #[arg(long, default_value_t = DEFAULT_TIMESPAN_SECS)]
    pub timespan: u64,

    /// Keep only the top N clients per device (0 = all)
    #[arg(long, short = 'n', default_value_t = 0)]
    pub count: usize,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Device display name to chart (case-insensitive)
    #[arg(long, short = 'd')]
    pub device: String,

    /// Directory to write PNG artifacts into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the effective configuration (secrets redacted)
    Show,
}
