// ── Device: leaf of the inventory hierarchy ──

use meraki_api::{DashboardApi, types::DeviceSummary};
use serde::Serialize;
use tracing::info;

use super::metrics::{ClientUsageRecord, PerformanceSummary, rank_by_usage};
use crate::chart::ChartRenderer;
use crate::error::CoreError;

/// Model prefix of the MX security-appliance family — the only devices
/// with WAN uplinks worth querying.
pub(crate) const SECURITY_APPLIANCE_PREFIX: &str = "MX";

/// A single managed device, identified by serial number.
///
/// Holds a non-owning back-reference to its network as a plain id; the
/// network owns the device, never the other way around.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub serial: String,
    pub name: String,
    pub model: String,
    pub network_id: String,
    /// Present once an uplink metrics fetch has succeeded; replaced
    /// wholesale on each subsequent success.
    pub performance: Option<PerformanceSummary>,
    /// Accumulates across top-talker fetches, always held sorted
    /// descending by total usage.
    pub clients: Vec<ClientUsageRecord>,
}

impl Device {
    pub(crate) fn new(summary: &DeviceSummary, network_id: &str) -> Self {
        Self {
            serial: summary.serial.clone(),
            // Unnamed devices fall back to their serial for display.
            name: summary
                .name
                .clone()
                .unwrap_or_else(|| summary.serial.clone()),
            model: summary.model.clone(),
            network_id: network_id.to_owned(),
            performance: None,
            clients: Vec::new(),
        }
    }

    /// Whether this device belongs to the MX family and therefore
    /// qualifies for uplink queries.
    pub fn is_security_appliance(&self) -> bool {
        self.model.starts_with(SECURITY_APPLIANCE_PREFIX)
    }

    /// Fetch uplink loss/latency history and summarize it.
    ///
    /// Returns `Ok(false)` when the dashboard has no samples for the
    /// window; any previously stored summary is left untouched.
    pub async fn fetch_uplink_metrics(
        &mut self,
        api: &DashboardApi,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Result<bool, meraki_api::Error> {
        info!(
            device = %self.name,
            serial = %self.serial,
            uplink,
            "fetching uplink loss and latency"
        );
        let samples = api
            .loss_and_latency_history(&self.network_id, &self.serial, ip, timespan_secs, uplink)
            .await?;

        match PerformanceSummary::from_samples(samples) {
            Some(summary) => {
                self.performance = Some(summary);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fetch client usage and merge it into the ranked client list.
    ///
    /// Repeated calls accumulate records; the whole list is re-ranked
    /// after every fetch.
    pub async fn fetch_top_talkers(
        &mut self,
        api: &DashboardApi,
        timespan_secs: u64,
    ) -> Result<(), meraki_api::Error> {
        info!(device = %self.name, serial = %self.serial, "fetching client usage");
        let usage = api.list_device_clients(&self.serial, timespan_secs).await?;

        self.clients
            .extend(usage.iter().map(ClientUsageRecord::from_usage));
        rank_by_usage(&mut self.clients);
        Ok(())
    }

    /// Fetch a fresh sample window and render sample-index vs latency to
    /// a PNG named `{date_tag}_{name}_latency.png`.
    ///
    /// Fetches independently rather than reusing a stored summary, so the
    /// chart always reflects the requested window. Returns the artifact
    /// name in a one-element vec, or an empty vec when there are no
    /// samples to plot.
    pub async fn render_uplink_latency_chart(
        &self,
        api: &DashboardApi,
        renderer: &dyn ChartRenderer,
        date_tag: &str,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Result<Vec<String>, CoreError> {
        info!(
            device = %self.name,
            serial = %self.serial,
            "fetching uplink latency for chart"
        );
        let samples = api
            .loss_and_latency_history(&self.network_id, &self.serial, ip, timespan_secs, uplink)
            .await?;

        if samples.is_empty() {
            return Ok(Vec::new());
        }

        // 1-based sequence index on the x axis.
        #[allow(clippy::cast_precision_loss)]
        let points: Vec<(f64, f64)> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| ((i + 1) as f64, s.latency_ms))
            .collect();

        let file_name = format!("{date_tag}_{}_latency.png", self.name);
        renderer.render_line(&points, &file_name)?;
        Ok(vec![file_name])
    }
}
