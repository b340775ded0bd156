// meraki-api: Async Rust client for the Cisco Meraki Dashboard API (v0)

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DashboardApi};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
