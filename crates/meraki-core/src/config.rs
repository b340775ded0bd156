// ── Client configuration ──
//
// Credential and endpoint travel with the config object handed to the
// Dashboard at construction; there is no process-wide base-url or header
// state.

use std::time::Duration;

use meraki_api::{DEFAULT_BASE_URL, TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// Configuration for a [`Dashboard`](crate::Dashboard) session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub base_url: Url,
    pub api_key: SecretString,
    pub timeout: Duration,
    pub tls: TlsMode,
}

impl DashboardConfig {
    /// Config pointed at the Meraki cloud with default transport settings.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key,
            timeout: Duration::from_secs(30),
            tls: TlsMode::System,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
