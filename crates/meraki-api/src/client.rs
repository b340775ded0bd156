// Hand-crafted async HTTP client for the Meraki Dashboard API (v0).
//
// Base path: https://api.meraki.com/api/v0/
// Auth: X-Cisco-Meraki-API-Key header
//
// The dashboard is consumed strictly read-only; only GET is issued.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

/// Default base URL of the Meraki cloud.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v0/";

// ── Error response shape from the dashboard ──────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Meraki Dashboard API.
///
/// Holds the configured base URL and a `reqwest::Client` carrying the
/// API-key header, replacing the usual global base-url/header pair with
/// explicit per-client state.
pub struct DashboardApi {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardApi {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X-Cisco-Meraki-API-Key` (marked sensitive) and
    /// `Content-Type: application/json` as default headers on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert("X-Cisco-Meraki-API-Key", key_value);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL, guaranteeing a trailing slash so relative
    /// joins (`organizations`, `networks/{id}/...`) resolve under it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    // ── HTTP plumbing ────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate by chars, not bytes: a byte cut can land inside
                // a multi-byte UTF-8 sequence.
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        // v0 error bodies look like {"errors": ["..."]}
        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Organizations ────────────────────────────────────────────────

    /// `GET /organizations` — all organizations the API key can see.
    pub async fn list_organizations(&self) -> Result<Vec<types::OrganizationSummary>, Error> {
        self.get("organizations").await
    }

    /// `GET /organizations/{id}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<types::NetworkSummary>, Error> {
        self.get(&format!("organizations/{org_id}/networks")).await
    }

    /// `GET /organizations/{id}/inventory` — the org-wide device list.
    ///
    /// Claimed devices carry the id of their owning network; unclaimed
    /// entries have `network_id: None`.
    pub async fn list_inventory(&self, org_id: &str) -> Result<Vec<types::DeviceSummary>, Error> {
        self.get(&format!("organizations/{org_id}/inventory")).await
    }

    // ── Networks ─────────────────────────────────────────────────────

    /// `GET /networks/{id}/devices`
    pub async fn list_network_devices(
        &self,
        network_id: &str,
    ) -> Result<Vec<types::DeviceSummary>, Error> {
        self.get(&format!("networks/{network_id}/devices")).await
    }

    // ── Device metrics ───────────────────────────────────────────────

    /// `GET /networks/{net}/devices/{serial}/lossAndLatencyHistory`
    ///
    /// Uplink probe history against `ip` over the trailing `timespan`
    /// seconds. An empty vec is a valid result (e.g. non-WAN uplinks).
    pub async fn loss_and_latency_history(
        &self,
        network_id: &str,
        serial: &str,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Result<Vec<types::LossLatencySample>, Error> {
        self.get_with_params(
            &format!("networks/{network_id}/devices/{serial}/lossAndLatencyHistory"),
            &[
                ("ip", ip.to_owned()),
                ("timespan", timespan_secs.to_string()),
                ("uplink", uplink.to_owned()),
            ],
        )
        .await
    }

    /// `GET /devices/{serial}/clients` — per-client usage over the
    /// trailing `timespan` seconds.
    pub async fn list_device_clients(
        &self,
        serial: &str,
        timespan_secs: u64,
    ) -> Result<Vec<types::ClientUsage>, Error> {
        self.get_with_params(
            &format!("devices/{serial}/clients"),
            &[("timespan", timespan_secs.to_string())],
        )
        .await
    }
}
