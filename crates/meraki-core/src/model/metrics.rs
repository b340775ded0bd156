// ── Metric value objects ──
//
// Aggregation happens here, in pure functions over fetched samples, so the
// math is testable without a live dashboard.

use std::cmp::Ordering;

use meraki_api::types::{ClientUsage, LossLatencySample};
use serde::Serialize;

/// Round to one decimal place, matching the dashboard's own report
/// precision.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summary of one uplink's loss/latency history. Replaced wholesale on
/// every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub avg_latency_ms: f64,
    pub avg_loss_percent: f64,
    pub min_latency_ms: f64,
    pub min_loss_percent: f64,
    pub max_latency_ms: f64,
    pub max_loss_percent: f64,
    /// The full ordered sample sequence the summary was computed from.
    pub samples: Vec<LossLatencySample>,
}

impl PerformanceSummary {
    /// Single-pass min/max/avg over a sample sequence.
    ///
    /// Returns `None` for an empty sequence — no samples is a valid
    /// result, not an error. Min/max trackers are seeded from the first
    /// sample so that histories entirely above 1000 ms or below 0 % still
    /// produce true extrema rather than clamp values.
    pub fn from_samples(samples: Vec<LossLatencySample>) -> Option<Self> {
        let first = samples.first()?;

        let mut min_latency = first.latency_ms;
        let mut max_latency = first.latency_ms;
        let mut min_loss = first.loss_percent;
        let mut max_loss = first.loss_percent;
        let mut total_latency = 0.0_f64;
        let mut total_loss = 0.0_f64;

        for sample in &samples {
            min_latency = min_latency.min(sample.latency_ms);
            max_latency = max_latency.max(sample.latency_ms);
            min_loss = min_loss.min(sample.loss_percent);
            max_loss = max_loss.max(sample.loss_percent);
            total_latency += sample.latency_ms;
            total_loss += sample.loss_percent;
        }

        #[allow(clippy::cast_precision_loss)]
        let count = samples.len() as f64;

        Some(Self {
            avg_latency_ms: round1(total_latency / count),
            avg_loss_percent: round1(total_loss / count),
            min_latency_ms: min_latency,
            min_loss_percent: min_loss,
            max_latency_ms: max_latency,
            max_loss_percent: max_loss,
            samples,
        })
    }
}

/// One client's usage over the queried window, in megabytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientUsageRecord {
    pub description: String,
    pub sent_mbytes: f64,
    pub recv_mbytes: f64,
    /// Computed from the raw sent+recv counters and rounded independently
    /// of the per-direction fields, so it need not equal
    /// `sent_mbytes + recv_mbytes` exactly.
    pub total_mbytes: f64,
    pub ip: String,
    pub mac: String,
}

impl ClientUsageRecord {
    /// Convert a raw usage entry (kilobyte counters) to megabytes,
    /// each field rounded to one decimal place.
    pub fn from_usage(raw: &ClientUsage) -> Self {
        let sent = raw.usage.sent;
        let recv = raw.usage.recv;

        Self {
            description: raw.description.clone().unwrap_or_default(),
            sent_mbytes: round1(sent / 1000.0),
            recv_mbytes: round1(recv / 1000.0),
            total_mbytes: round1((sent + recv) / 1000.0),
            ip: raw.ip.clone().unwrap_or_default(),
            mac: raw.mac.clone().unwrap_or_default(),
        }
    }
}

/// Rank clients descending by total usage. Stable, so ties keep their
/// insertion order.
pub(crate) fn rank_by_usage(clients: &mut [ClientUsageRecord]) {
    clients.sort_by(|a, b| {
        b.total_mbytes
            .partial_cmp(&a.total_mbytes)
            .unwrap_or(Ordering::Equal)
    });
}
