// ── Dashboard: front door over the whole fleet ──

use meraki_api::DashboardApi;
use tracing::{error, info, warn};

use crate::chart::ChartRenderer;
use crate::config::DashboardConfig;
use crate::model::{OrgReport, Organization, TopTalkersDeviceReport, UplinkDeviceReport};

/// Default probe target for uplink loss/latency queries.
pub const DEFAULT_PROBE_IP: &str = "8.8.8.8";
/// Default lookback window: one day.
pub const DEFAULT_TIMESPAN_SECS: u64 = 86_400;
/// Default WAN uplink name.
pub const DEFAULT_UPLINK: &str = "wan1";

/// Holds the API client and the discovered organizations, and fans
/// fleet-wide queries out to each of them.
///
/// The fan-out is sequential and deterministic: reports come back in
/// organization discovery order, one per organization, empty or not.
pub struct Dashboard {
    api: DashboardApi,
    organizations: Vec<Organization>,
}

impl Dashboard {
    /// Build a dashboard session from explicit configuration.
    pub fn new(config: &DashboardConfig) -> Result<Self, meraki_api::Error> {
        let api =
            DashboardApi::from_api_key(config.base_url.as_str(), &config.api_key, &config.transport())?;
        Ok(Self::from_api(api))
    }

    /// Wrap an already-built API client (used by tests).
    pub fn from_api(api: DashboardApi) -> Self {
        Self {
            api,
            organizations: Vec::new(),
        }
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    /// Enumerate organizations and run full inventory discovery on each.
    ///
    /// Best-effort boundary: if the organization listing itself fails the
    /// error is logged, internal state stays empty, and `false` comes
    /// back. A single organization's discovery failure is isolated — the
    /// organization is kept with whatever was discovered and the rest of
    /// the fleet proceeds.
    pub async fn login(&mut self) -> bool {
        info!("listing organizations visible to the API key");
        let orgs = match self.api.list_organizations().await {
            Ok(orgs) => orgs,
            Err(err) => {
                error!(%err, "organization listing failed");
                return false;
            }
        };

        for summary in &orgs {
            let mut org = Organization::new(&summary.id, &summary.name);
            if let Err(err) = org.discover_inventory(&self.api).await {
                warn!(org = %org.name, %err, "inventory discovery failed");
            }
            self.organizations.push(org);
        }

        true
    }

    /// Uplink loss/latency for the whole fleet with the fixed probe
    /// defaults (`8.8.8.8`, one day, `wan1`).
    pub async fn query_uplink_metrics(&mut self) -> Vec<OrgReport<UplinkDeviceReport>> {
        self.query_uplink_metrics_with(DEFAULT_PROBE_IP, DEFAULT_TIMESPAN_SECS, DEFAULT_UPLINK)
            .await
    }

    /// Uplink loss/latency for the whole fleet with explicit parameters.
    pub async fn query_uplink_metrics_with(
        &mut self,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Vec<OrgReport<UplinkDeviceReport>> {
        let mut reports = Vec::with_capacity(self.organizations.len());
        for org in &mut self.organizations {
            reports.push(
                org.query_uplink_metrics(&self.api, ip, timespan_secs, uplink)
                    .await,
            );
        }
        reports
    }

    /// Top talkers for the whole fleet. `top_n == 0` keeps every client.
    pub async fn query_top_talkers(
        &mut self,
        timespan_secs: u64,
        top_n: usize,
    ) -> Vec<OrgReport<TopTalkersDeviceReport>> {
        let mut reports = Vec::with_capacity(self.organizations.len());
        for org in &mut self.organizations {
            reports.push(org.query_top_talkers(&self.api, timespan_secs, top_n).await);
        }
        reports
    }

    /// Render latency charts for every device matching `device_name`
    /// (case-insensitive), using the fixed probe defaults. Returns the
    /// artifact names.
    pub async fn render_uplink_charts(
        &self,
        renderer: &dyn ChartRenderer,
        device_name: &str,
    ) -> Vec<String> {
        let mut artifacts = Vec::new();
        for org in &self.organizations {
            artifacts.extend(
                org.render_uplink_charts(
                    &self.api,
                    renderer,
                    device_name,
                    DEFAULT_PROBE_IP,
                    DEFAULT_TIMESPAN_SECS,
                    DEFAULT_UPLINK,
                )
                .await,
            );
        }
        artifacts
    }
}
