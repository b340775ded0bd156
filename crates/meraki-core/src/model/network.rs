// ── Network: mid-tier container, filters and delegates to devices ──

use meraki_api::{
    DashboardApi,
    types::{DeviceSummary, NetworkSummary},
};
use serde::Serialize;
use tracing::{info, warn};

use super::device::Device;
use crate::chart::ChartRenderer;

/// A site or logical device grouping within an organization.
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    /// Network type tag ("wireless", "appliance", ...). Informational only.
    pub kind: String,
    /// Non-owning back-reference to the owning organization.
    pub organization_id: String,
    pub devices: Vec<Device>,
}

impl Network {
    pub(crate) fn new(summary: &NetworkSummary, organization_id: &str) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            kind: summary.kind.clone().unwrap_or_default(),
            organization_id: organization_id.to_owned(),
            devices: Vec::new(),
        }
    }

    pub(crate) fn attach_device(&mut self, summary: &DeviceSummary) {
        self.devices.push(Device::new(summary, &self.id));
    }

    /// Discover this network's devices directly.
    ///
    /// Alternative to [`Organization::discover_inventory`]'s org-wide
    /// sweep; repeated calls append duplicates, so invoke at most once
    /// per network lifetime and never combine the two discovery paths.
    ///
    /// [`Organization::discover_inventory`]: super::Organization::discover_inventory
    pub async fn discover_devices(&mut self, api: &DashboardApi) -> Result<(), meraki_api::Error> {
        info!(network = %self.name, id = %self.id, "listing network devices");
        let listed = api.list_network_devices(&self.id).await?;
        for summary in &listed {
            self.attach_device(summary);
        }
        Ok(())
    }

    /// Fetch uplink metrics on every MX-family device, returning the
    /// devices whose fetch produced samples.
    ///
    /// A device whose fetch fails is logged and skipped rather than
    /// aborting the sweep; result order follows device insertion order.
    pub async fn query_uplink_metrics(
        &mut self,
        api: &DashboardApi,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Vec<&Device> {
        let mut succeeded = Vec::new();

        for (idx, device) in self.devices.iter_mut().enumerate() {
            if !device.is_security_appliance() {
                continue;
            }
            match device.fetch_uplink_metrics(api, ip, timespan_secs, uplink).await {
                Ok(true) => succeeded.push(idx),
                Ok(false) => {}
                Err(err) => warn!(
                    device = %device.name,
                    serial = %device.serial,
                    %err,
                    "uplink metrics fetch failed, skipping device"
                ),
            }
        }

        succeeded
            .into_iter()
            .filter_map(|idx| self.devices.get(idx))
            .collect()
    }

    /// Fetch client usage on every MX-family device.
    ///
    /// Returns all queried appliances; whether a device actually has
    /// clients is filtered one level up.
    pub async fn query_top_talkers(
        &mut self,
        api: &DashboardApi,
        timespan_secs: u64,
    ) -> Vec<&Device> {
        let mut queried = Vec::new();

        for (idx, device) in self.devices.iter_mut().enumerate() {
            if !device.is_security_appliance() {
                continue;
            }
            match device.fetch_top_talkers(api, timespan_secs).await {
                Ok(()) => queried.push(idx),
                Err(err) => warn!(
                    device = %device.name,
                    serial = %device.serial,
                    %err,
                    "client usage fetch failed, skipping device"
                ),
            }
        }

        queried
            .into_iter()
            .filter_map(|idx| self.devices.get(idx))
            .collect()
    }

    /// Render latency charts for MX-family devices whose display name
    /// matches `target_name` case-insensitively.
    pub async fn render_uplink_charts(
        &self,
        api: &DashboardApi,
        renderer: &dyn ChartRenderer,
        target_name: &str,
        date_tag: &str,
        ip: &str,
        timespan_secs: u64,
        uplink: &str,
    ) -> Vec<String> {
        let mut artifacts = Vec::new();

        for device in &self.devices {
            if !device.is_security_appliance() || !device.name.eq_ignore_ascii_case(target_name) {
                continue;
            }
            match device
                .render_uplink_latency_chart(api, renderer, date_tag, ip, timespan_secs, uplink)
                .await
            {
                Ok(names) => artifacts.extend(names),
                Err(err) => warn!(
                    device = %device.name,
                    serial = %device.serial,
                    %err,
                    "chart rendering failed, skipping device"
                ),
            }
        }

        artifacts
    }
}
