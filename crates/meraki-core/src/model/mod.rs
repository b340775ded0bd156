// ── Domain model: Organization → Network → Device ──
//
// Forward containment is the only ownership direction; back-references
// are plain id strings.

mod device;
mod metrics;
mod network;
mod organization;
mod report;

pub use device::Device;
pub use metrics::{ClientUsageRecord, PerformanceSummary};
pub use network::Network;
pub use organization::Organization;
pub use report::{NetworkReport, OrgReport, TopTalkersDeviceReport, UplinkDeviceReport};
