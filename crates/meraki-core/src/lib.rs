//! Domain hierarchy and aggregation over the Meraki Dashboard API.
//!
//! Mirrors the remote resource tree: a [`Dashboard`] discovers
//! [`Organization`]s, each owning [`Network`]s, each owning [`Device`]s.
//! Devices fetch and summarize their own uplink loss/latency history and
//! client usage; results bubble up as typed report structs.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;

pub use chart::{ChartError, ChartRenderer, PngChartRenderer};
pub use config::DashboardConfig;
pub use dashboard::{DEFAULT_PROBE_IP, DEFAULT_TIMESPAN_SECS, DEFAULT_UPLINK, Dashboard};
pub use error::CoreError;
pub use model::{
    ClientUsageRecord, Device, Network, NetworkReport, OrgReport, Organization,
    PerformanceSummary, TopTalkersDeviceReport, UplinkDeviceReport,
};
