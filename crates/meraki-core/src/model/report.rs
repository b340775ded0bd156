// ── Typed report structs ──
//
// Query results are reshaped into these records (rather than handing out
// references into the live hierarchy) so callers get compile-time shape
// checking and a serializable payload.

use serde::Serialize;

use super::metrics::{ClientUsageRecord, PerformanceSummary};

/// One organization's result for a fleet-wide query. Generic over the
/// per-device payload the query produces.
#[derive(Debug, Clone, Serialize)]
pub struct OrgReport<D> {
    pub id: String,
    pub name: String,
    pub networks: Vec<NetworkReport<D>>,
}

impl<D> OrgReport<D> {
    pub(crate) fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            networks: Vec::new(),
        }
    }

    /// `true` when no network contributed any qualifying device.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport<D> {
    pub id: String,
    pub name: String,
    pub devices: Vec<D>,
}

/// Device entry in an uplink loss/latency report.
#[derive(Debug, Clone, Serialize)]
pub struct UplinkDeviceReport {
    pub name: String,
    pub serial: String,
    pub performance: PerformanceSummary,
}

/// Device entry in a top-talkers report.
#[derive(Debug, Clone, Serialize)]
pub struct TopTalkersDeviceReport {
    pub name: String,
    pub serial: String,
    pub clients: Vec<ClientUsageRecord>,
}
