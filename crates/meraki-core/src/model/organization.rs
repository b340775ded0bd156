// ── Organization: top-level tenant, discovery orchestration ──

use chrono::Local;
use meraki_api::DashboardApi;
use serde::Serialize;
use tracing::{info, warn};

use super::network::Network;
use super::report::{NetworkReport, OrgReport, TopTalkersDeviceReport, UplinkDeviceReport};
use crate::chart::ChartRenderer;

/// A tenant/account grouping in the remote inventory hierarchy.
///
/// The network collection grows monotonically during discovery and is
/// never pruned; id and name are fixed at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub networks: Vec<Network>,
    #[serde(skip)]
    discovered: bool,
}

impl Organization {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            networks: Vec::new(),
            discovered: false,
        }
    }

    /// Two-phase inventory discovery: list the organization's networks,
    /// then partition the org-wide device inventory by network id.
    ///
    /// Guarded against repeat invocation — a second call would duplicate
    /// every device, so it logs and returns unchanged. The per-network
    /// [`Network::discover_devices`] path is the alternative strategy;
    /// pick one per organization lifetime.
    pub async fn discover_inventory(&mut self, api: &DashboardApi) -> Result<(), meraki_api::Error> {
        if self.discovered {
            warn!(org = %self.name, "inventory already discovered, ignoring repeat call");
            return Ok(());
        }

        info!(org = %self.name, id = %self.id, "listing networks");
        let networks = api.list_networks(&self.id).await?;
        for summary in &networks {
            self.networks.push(Network::new(summary, &self.id));
        }
        // Set once networks are attached so a retried call after an
        // inventory failure cannot duplicate them.
        self.discovered = true;

        info!(org = %self.name, id = %self.id, "listing device inventory");
        let inventory = api.list_inventory(&self.id).await?;
        for device in &inventory {
            // Unclaimed inventory entries carry no network id.
            let Some(network_id) = device.network_id.as_deref() else {
                continue;
            };
            match self.networks.iter_mut().find(|n| n.id == network_id) {
                Some(network) => network.attach_device(device),
                None => warn!(
                    serial = %device.serial,
                    network_id,
                    "inventory device references unknown network"
                ),
            }
        }

        Ok(())
    }

    /// Uplink loss/latency across every network. Networks contributing at
    /// least one device with samples appear in the report; the rest are
    /// omitted.
    pub async fn query_uplink_metrics(
        &mut self,
        api: &DashboardApi,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> OrgReport<UplinkDeviceReport> {
        let mut report = OrgReport::new(&self.id, &self.name);

        for network in &mut self.networks {
            let entries: Vec<UplinkDeviceReport> = network
                .query_uplink_metrics(api, ip, timespan_secs, uplink)
                .await
                .iter()
                .filter_map(|device| {
                    device.performance.clone().map(|performance| UplinkDeviceReport {
                        name: device.name.clone(),
                        serial: device.serial.clone(),
                        performance,
                    })
                })
                .collect();

            if !entries.is_empty() {
                report.networks.push(NetworkReport {
                    id: network.id.clone(),
                    name: network.name.clone(),
                    devices: entries,
                });
            }
        }

        report
    }

    /// Top talkers across every network. Only devices with a non-empty
    /// client list appear; `top_n > 0` truncates each ranked list to its
    /// first `top_n` entries, `top_n == 0` keeps everything.
    pub async fn query_top_talkers(
        &mut self,
        api: &DashboardApi,
        timespan_secs: u64,
        top_n: usize,
    ) -> OrgReport<TopTalkersDeviceReport> {
        let mut report = OrgReport::new(&self.id, &self.name);

        for network in &mut self.networks {
            let entries: Vec<TopTalkersDeviceReport> = network
                .query_top_talkers(api, timespan_secs)
                .await
                .iter()
                .filter(|device| !device.clients.is_empty())
                .map(|device| {
                    let mut clients = device.clients.clone();
                    if top_n > 0 {
                        clients.truncate(top_n);
                    }
                    TopTalkersDeviceReport {
                        name: device.name.clone(),
                        serial: device.serial.clone(),
                        clients,
                    }
                })
                .collect();

            if !entries.is_empty() {
                report.networks.push(NetworkReport {
                    id: network.id.clone(),
                    name: network.name.clone(),
                    devices: entries,
                });
            }
        }

        report
    }

    /// Render latency charts for matching devices in every network,
    /// stamping artifacts with a shared timestamp tag.
    pub async fn render_uplink_charts(
        &self,
        api: &DashboardApi,
        renderer: &dyn ChartRenderer,
        device_name: &str,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Vec<String> {
        let date_tag = Local::now().format("%Y-%m-%d_%H%M%S").to_string();
        let mut artifacts = Vec::new();

        for network in &self.networks {
            artifacts.extend(
                network
                    .render_uplink_charts(
                        api,
                        renderer,
                        device_name,
                        &date_tag,
                        ip,
                        timespan_secs,
                        uplink,
                    )
                    .await,
            );
        }

        artifacts
    }
}
