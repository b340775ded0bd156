// Transport configuration for building reqwest::Client instances.
//
// The Meraki cloud presents a publicly trusted certificate, so the default
// is the system store; the other modes exist for proxies and lab setups.

use std::path::PathBuf;
use std::time::Duration;

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (intercepting proxies, lab environments).
    DangerAcceptInvalid,
}

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        self.apply_tls(reqwest::Client::builder())?
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used to inject the `X-Cisco-Meraki-API-Key` header on every request.
    pub fn build_client_with_headers(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        self.apply_tls(reqwest::Client::builder().default_headers(headers))?
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    fn apply_tls(
        &self,
        builder: reqwest::ClientBuilder,
    ) -> Result<reqwest::ClientBuilder, crate::error::Error> {
        let builder = builder
            .timeout(self.timeout)
            .user_agent(concat!("merakictl/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => Ok(builder),
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path).map_err(|e| {
                    crate::error::Error::Tls(format!("failed to read CA cert: {e}"))
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| crate::error::Error::Tls(format!("invalid CA cert: {e}")))?;
                Ok(builder.add_root_certificate(cert))
            }
            TlsMode::DangerAcceptInvalid => Ok(builder.danger_accept_invalid_certs(true)),
        }
    }
}
