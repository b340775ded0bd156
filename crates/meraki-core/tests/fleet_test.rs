// End-to-end tests for the discovery/query hierarchy against a mock
// dashboard.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::DashboardApi;
use meraki_core::{
    ChartError, ChartRenderer, Dashboard, Device, Network, DEFAULT_TIMESPAN_SECS,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn api_for(server: &MockServer) -> DashboardApi {
    DashboardApi::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap()
}

fn mx_device(serial: &str, name: &str, network_id: &str) -> Device {
    Device {
        serial: serial.to_owned(),
        name: name.to_owned(),
        model: "MX68".to_owned(),
        network_id: network_id.to_owned(),
        performance: None,
        clients: Vec::new(),
    }
}

/// Chart renderer that records what it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    calls: Mutex<Vec<(usize, String)>>,
}

impl RecordingRenderer {
    fn calls(&self) -> Vec<(usize, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render_line(&self, points: &[(f64, f64)], file_name: &str) -> Result<(), ChartError> {
        self.calls
            .lock()
            .unwrap()
            .push((points.len(), file_name.to_owned()));
        Ok(())
    }
}

/// Mount the Acme fixture: one org, networks HQ (one MX) and Remote
/// (one MR access point).
async fn mount_acme_inventory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "1", "name": "Acme" }])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_1", "name": "HQ", "type": "appliance" },
            { "id": "N_2", "name": "Remote", "type": "wireless" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2MX-0001", "name": "Branch-FW", "model": "MX68", "networkId": "N_1" },
            { "serial": "Q2MR-0002", "name": "Lobby-AP", "model": "MR36", "networkId": "N_2" },
        ])))
        .mount(server)
        .await;
}

// ── Login / discovery ───────────────────────────────────────────────

#[tokio::test]
async fn login_discovers_full_inventory() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let orgs = dashboard.organizations();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].name, "Acme");
    assert_eq!(orgs[0].networks.len(), 2);
    assert_eq!(orgs[0].networks[0].name, "HQ");
    assert_eq!(orgs[0].networks[0].devices.len(), 1);
    assert_eq!(orgs[0].networks[0].devices[0].serial, "Q2MX-0001");
    assert_eq!(orgs[0].networks[1].devices.len(), 1);
}

#[tokio::test]
async fn login_failure_leaves_state_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(!dashboard.login().await);
    assert!(dashboard.organizations().is_empty());
}

#[tokio::test]
async fn one_org_discovery_failure_does_not_sink_the_fleet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Broken" },
            { "id": "2", "name": "Healthy" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/networks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/2/networks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "N_9", "name": "Lab", "type": "appliance" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/2/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    // Both organizations are kept, in discovery order.
    let orgs = dashboard.organizations();
    assert_eq!(orgs.len(), 2);
    assert!(orgs[0].networks.is_empty());
    assert_eq!(orgs[1].networks.len(), 1);
}

#[tokio::test]
async fn per_network_discovery_attaches_listed_devices() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2MX-0001", "name": "Branch-FW", "model": "MX68" },
            { "serial": "Q2MR-0002", "name": null, "model": "MR36" },
        ])))
        .mount(&server)
        .await;

    let mut network = Network {
        id: "N_1".to_owned(),
        name: "HQ".to_owned(),
        kind: "appliance".to_owned(),
        organization_id: "1".to_owned(),
        devices: Vec::new(),
    };
    network.discover_devices(&api_for(&server)).await.unwrap();

    assert_eq!(network.devices.len(), 2);
    assert_eq!(network.devices[0].name, "Branch-FW");
    // Unnamed devices fall back to their serial.
    assert_eq!(network.devices[1].name, "Q2MR-0002");
}

#[tokio::test]
async fn repeated_discovery_does_not_duplicate_devices() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    let api = api_for(&server);
    let mut org = meraki_core::Organization::new("1", "Acme");
    org.discover_inventory(&api).await.unwrap();
    org.discover_inventory(&api).await.unwrap();

    assert_eq!(org.networks.len(), 2);
    assert_eq!(org.networks[0].devices.len(), 1);
}

// ── Uplink metrics ──────────────────────────────────────────────────

#[tokio::test]
async fn uplink_report_matches_reference_scenario() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-0001/lossAndLatencyHistory"))
        .and(query_param("ip", "8.8.8.8"))
        .and(query_param("timespan", "86400"))
        .and(query_param("uplink", "wan1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lossPercent": 0.0, "latencyMs": 10.0 },
            { "lossPercent": 2.0, "latencyMs": 14.0 },
            { "lossPercent": 1.0, "latencyMs": 12.0 },
        ])))
        .mount(&server)
        .await;

    // The MR access point must never be queried for uplink history.
    Mock::given(method("GET"))
        .and(path("/networks/N_2/devices/Q2MR-0002/lossAndLatencyHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let reports = dashboard.query_uplink_metrics().await;
    assert_eq!(reports.len(), 1);

    let org = &reports[0];
    assert_eq!(org.name, "Acme");
    // "Remote" has no qualifying devices and is omitted entirely.
    assert_eq!(org.networks.len(), 1);
    assert_eq!(org.networks[0].name, "HQ");
    assert_eq!(org.networks[0].devices.len(), 1);

    let device = &org.networks[0].devices[0];
    assert_eq!(device.name, "Branch-FW");
    assert_eq!(device.serial, "Q2MX-0001");
    assert_eq!(device.performance.avg_loss_percent, 1.0);
    assert_eq!(device.performance.min_loss_percent, 0.0);
    assert_eq!(device.performance.max_loss_percent, 2.0);
    assert_eq!(device.performance.avg_latency_ms, 12.0);
    assert_eq!(device.performance.min_latency_ms, 10.0);
    assert_eq!(device.performance.max_latency_ms, 14.0);
    assert_eq!(device.performance.samples.len(), 3);
}

#[tokio::test]
async fn empty_history_reports_false_and_keeps_prior_summary() {
    let with_samples = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-0001/lossAndLatencyHistory"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "lossPercent": 1.0, "latencyMs": 20.0 }])),
        )
        .mount(&with_samples)
        .await;

    let empty = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-0001/lossAndLatencyHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&empty)
        .await;

    let mut device = mx_device("Q2MX-0001", "Branch-FW", "N_1");

    let got = device
        .fetch_uplink_metrics(&api_for(&with_samples), "8.8.8.8", 86_400, "wan1")
        .await
        .unwrap();
    assert!(got);
    let summary = device.performance.clone().unwrap();

    let got = device
        .fetch_uplink_metrics(&api_for(&empty), "8.8.8.8", 86_400, "wan1")
        .await
        .unwrap();
    assert!(!got);
    assert_eq!(device.performance.unwrap(), summary);
}

#[tokio::test]
async fn failing_device_is_skipped_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-BAD/lossAndLatencyHistory"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-GOOD/lossAndLatencyHistory"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "lossPercent": 0.5, "latencyMs": 18.0 }])),
        )
        .mount(&server)
        .await;

    let mut network = Network {
        id: "N_1".to_owned(),
        name: "HQ".to_owned(),
        kind: "appliance".to_owned(),
        organization_id: "1".to_owned(),
        devices: vec![
            mx_device("Q2MX-BAD", "Broken-FW", "N_1"),
            mx_device("Q2MX-GOOD", "Working-FW", "N_1"),
        ],
    };

    let api = api_for(&server);
    let devices = network
        .query_uplink_metrics(&api, "8.8.8.8", DEFAULT_TIMESPAN_SECS, "wan1")
        .await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].serial, "Q2MX-GOOD");
}

// ── Top talkers ─────────────────────────────────────────────────────

async fn mount_talkers_fixture(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "1", "name": "Acme" }])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/networks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "N_1", "name": "HQ", "type": "appliance" }])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2MX-BUSY", "name": "Busy-FW", "model": "MX100", "networkId": "N_1" },
            { "serial": "Q2MX-IDLE", "name": "Idle-FW", "model": "MX68", "networkId": "N_1" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices/Q2MX-BUSY/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "description": "backup-server", "usage": { "sent": 900.0, "recv": 100.0 },
              "ip": "10.0.0.2", "mac": "00:00:00:00:00:02" },
            { "description": "workstation", "usage": { "sent": 5000.0, "recv": 7000.0 },
              "ip": "10.0.0.3", "mac": "00:00:00:00:00:03" },
            { "description": "printer", "usage": { "sent": 10.0, "recv": 5.0 },
              "ip": "10.0.0.4", "mac": "00:00:00:00:00:04" },
        ])))
        .mount(server)
        .await;

    // Queried successfully but no clients: excluded from reports.
    Mock::given(method("GET"))
        .and(path("/devices/Q2MX-IDLE/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn top_talkers_ranked_and_clientless_devices_excluded() {
    let server = MockServer::start().await;
    mount_talkers_fixture(&server).await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let reports = dashboard.query_top_talkers(DEFAULT_TIMESPAN_SECS, 0).await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].networks.len(), 1);

    let devices = &reports[0].networks[0].devices;
    assert_eq!(devices.len(), 1, "clientless device must be excluded");
    assert_eq!(devices[0].name, "Busy-FW");

    let clients = &devices[0].clients;
    assert_eq!(clients.len(), 3);
    assert_eq!(clients[0].description, "workstation");
    assert_eq!(clients[0].total_mbytes, 12.0);
    assert_eq!(clients[1].description, "backup-server");
    assert_eq!(clients[2].description, "printer");
}

#[tokio::test]
async fn top_talkers_truncates_to_count() {
    let server = MockServer::start().await;
    mount_talkers_fixture(&server).await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let reports = dashboard.query_top_talkers(DEFAULT_TIMESPAN_SECS, 2).await;
    let clients = &reports[0].networks[0].devices[0].clients;

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].description, "workstation");
    assert_eq!(clients[1].description, "backup-server");
}

#[tokio::test]
async fn repeated_talker_fetches_accumulate_and_rerank() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices/Q2MX-0001/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "description": "laptop", "usage": { "sent": 500.0, "recv": 500.0 },
              "ip": "10.0.0.5", "mac": "00:00:00:00:00:05" },
        ])))
        .mount(&server)
        .await;

    let mut device = mx_device("Q2MX-0001", "Branch-FW", "N_1");
    let api = api_for(&server);

    device.fetch_top_talkers(&api, 3600).await.unwrap();
    device.fetch_top_talkers(&api, 3600).await.unwrap();

    assert_eq!(device.clients.len(), 2);
    assert!(device.clients[0].total_mbytes >= device.clients[1].total_mbytes);
}

// ── Chart rendering ─────────────────────────────────────────────────

#[tokio::test]
async fn chart_name_match_is_case_insensitive() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-0001/lossAndLatencyHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lossPercent": 0.0, "latencyMs": 10.0 },
            { "lossPercent": 1.0, "latencyMs": 11.0 },
        ])))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let renderer = RecordingRenderer::default();
    let artifacts = dashboard.render_uplink_charts(&renderer, "branch-fw").await;

    assert_eq!(artifacts.len(), 1);
    assert!(artifacts[0].ends_with("_Branch-FW_latency.png"));

    let calls = renderer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, 2, "one point per sample");
    assert_eq!(calls[0].1, artifacts[0]);
}

#[tokio::test]
async fn chart_skipped_when_no_samples() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices/Q2MX-0001/lossAndLatencyHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let renderer = RecordingRenderer::default();
    let artifacts = dashboard.render_uplink_charts(&renderer, "Branch-FW").await;

    assert!(artifacts.is_empty());
    assert!(renderer.calls().is_empty());
}

#[tokio::test]
async fn chart_ignores_non_matching_and_non_mx_devices() {
    let server = MockServer::start().await;
    mount_acme_inventory(&server).await;

    let mut dashboard = Dashboard::from_api(api_for(&server));
    assert!(dashboard.login().await);

    let renderer = RecordingRenderer::default();
    // "Lobby-AP" exists but is an MR access point; no chart, no fetch.
    let artifacts = dashboard.render_uplink_charts(&renderer, "Lobby-AP").await;

    assert!(artifacts.is_empty());
    assert!(renderer.calls().is_empty());
}
