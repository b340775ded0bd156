// Wire types for the Dashboard API v0.
//
// The v0 API is loosely typed: numeric ids arrive as numbers or strings
// depending on endpoint age, and most descriptive fields may be null.
// Identifiers are normalized to `String` at the deserialization boundary
// and treated as opaque from there on.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept a JSON string or number and normalize to `String`.
fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// Same as [`string_or_number`], for optional fields.
fn opt_string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrap>::deserialize(de)?.map(|w| w.0))
}

/// One entry from `GET /organizations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// One entry from `GET /organizations/{id}/networks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Network type tag ("wireless", "appliance", "combined", ...).
    /// Informational only.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// One device record, from either `GET /organizations/{id}/inventory`
/// (carries `networkId` for claimed devices) or `GET /networks/{id}/devices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub network_id: Option<String>,
}

/// One sample from `GET .../lossAndLatencyHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossLatencySample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub loss_percent: f64,
    pub latency_ms: f64,
}

/// Sent/received counters inside a client usage record, in kilobytes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsageCounters {
    #[serde(default)]
    pub sent: f64,
    #[serde(default)]
    pub recv: f64,
}

/// One entry from `GET /devices/{serial}/clients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUsage {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage: UsageCounters,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}
