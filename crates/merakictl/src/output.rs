//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders report data in the format selected by `--output`. Table uses
//! `tabled`, structured formats serialize the untouched report types via
//! serde, plain emits one value per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render serializable data in the chosen format.
///
/// Reports are hierarchical while tables are flat, so the caller supplies
/// the flattened rows and plain-format lines; JSON and YAML serialize the
/// data itself.
pub fn render<T, R>(
    format: &OutputFormat,
    data: &T,
    rows: impl FnOnce() -> Vec<R>,
    lines: impl FnOnce() -> Vec<String>,
) -> String
where
    T: serde::Serialize + ?Sized,
    R: Tabled,
{
    match format {
        OutputFormat::Table => render_table(&rows()),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => lines().join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print an informational notice to stderr, styled when color is on.
pub fn notice(message: &str, color: &ColorMode, quiet: bool) {
    if quiet {
        return;
    }
    if should_color(color) {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
