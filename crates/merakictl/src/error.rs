//! CLI error types with miette diagnostics.
//!
//! Maps API and core errors into user-facing errors with actionable help
//! text and stable process exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Meraki dashboard")]
    #[diagnostic(
        code(merakictl::connection_failed),
        help(
            "Check network connectivity and the configured base URL.\n\
             Details: {message}"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Organization discovery failed")]
    #[diagnostic(
        code(merakictl::login_failed),
        help(
            "The dashboard did not return an organization list.\n\
             Check the API key and connectivity, or rerun with -v for details."
        )
    )]
    LoginFailed,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(merakictl::auth_failed),
        help(
            "The dashboard rejected the API key.\n\
             Generate one under Organization > Settings > Dashboard API access."
        )
    )]
    AuthFailed,

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(merakictl::no_credentials),
        help(
            "Set MERAKI_API_KEY, pass --api-key, or add api_key to the\n\
             profile in the config file (see: merakictl config path)."
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Dashboard API error ({status}): {message}")]
    #[diagnostic(code(merakictl::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected dashboard response: {message}")]
    #[diagnostic(code(merakictl::unexpected_response))]
    UnexpectedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(merakictl::validation))]
    Validation { field: String, reason: String },

    // ── Charting ─────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(merakictl::chart))]
    Chart(#[from] meraki_core::ChartError),

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(merakictl::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::LoginFailed => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── API/core error mapping ───────────────────────────────────────────

impl From<meraki_api::Error> for CliError {
    fn from(err: meraki_api::Error) -> Self {
        if err.is_auth() {
            return Self::AuthFailed;
        }
        if err.is_connection() {
            return Self::ConnectionFailed {
                message: err.to_string(),
            };
        }
        match err {
            meraki_api::Error::Api { status, message } => Self::Api { status, message },
            other => Self::UnexpectedResponse {
                message: other.to_string(),
            },
        }
    }
}

impl From<meraki_core::CoreError> for CliError {
    fn from(err: meraki_core::CoreError) -> Self {
        match err {
            meraki_core::CoreError::Api(api) => api.into(),
            meraki_core::CoreError::Chart(chart) => chart.into(),
        }
    }
}
