use thiserror::Error;

/// Top-level error type for the `meraki-api` crate.
///
/// The Dashboard API is consumed read-only, so the failure modes are
/// transport problems, auth rejection, non-2xx statuses, and bad JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// API key rejected by the dashboard (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or handshake error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response from the Dashboard API.
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the credential was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidApiKey)
    }

    /// Returns `true` for connection-level failures (as opposed to API
    /// rejections), used by callers to pick a diagnostic.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Tls(_) => true,
            _ => false,
        }
    }
}
