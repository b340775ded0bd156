// Integration tests for `DashboardApi` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::{DashboardApi, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardApi) {
    let server = MockServer::start().await;
    let client = DashboardApi::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_organizations() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 730666, "name": "Acme" },
        { "id": "549236", "name": "Branch Holdings" },
    ]);

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();

    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].id, "730666");
    assert_eq!(orgs[0].name, "Acme");
    assert_eq!(orgs[1].id, "549236");
}

#[tokio::test]
async fn test_list_networks() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": "N_100", "name": "HQ", "type": "appliance" },
        { "id": "N_101", "name": "Guest WiFi", "type": "wireless" },
    ]);

    Mock::given(method("GET"))
        .and(path("/organizations/730666/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let networks = client.list_networks("730666").await.unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "N_100");
    assert_eq!(networks[0].kind.as_deref(), Some("appliance"));
}

#[tokio::test]
async fn test_list_inventory_partitions_by_network() {
    let (server, client) = setup().await;

    let body = json!([
        { "serial": "Q2XX-AAAA-0001", "name": "Branch-FW", "model": "MX68", "networkId": "N_100" },
        { "serial": "Q2XX-AAAA-0002", "name": null, "model": "MR36", "networkId": "N_101" },
        { "serial": "Q2XX-AAAA-0003", "model": "MS120", "networkId": null },
    ]);

    Mock::given(method("GET"))
        .and(path("/organizations/730666/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let devices = client.list_inventory("730666").await.unwrap();

    assert_eq!(devices.len(), 3);
    assert_eq!(devices[0].network_id.as_deref(), Some("N_100"));
    assert!(devices[1].name.is_none());
    assert!(devices[2].network_id.is_none());
}

#[tokio::test]
async fn test_loss_and_latency_history_params() {
    let (server, client) = setup().await;

    let body = json!([
        { "startTime": "2019-01-31T18:46:13Z", "endTime": "2019-01-31T18:47:13Z",
          "lossPercent": 0.0, "latencyMs": 10.0 },
        { "lossPercent": 2.0, "latencyMs": 14.0 },
    ]);

    Mock::given(method("GET"))
        .and(path(
            "/networks/N_100/devices/Q2XX-AAAA-0001/lossAndLatencyHistory",
        ))
        .and(query_param("ip", "8.8.8.8"))
        .and(query_param("timespan", "86400"))
        .and(query_param("uplink", "wan1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let samples = client
        .loss_and_latency_history("N_100", "Q2XX-AAAA-0001", "8.8.8.8", 86_400, "wan1")
        .await
        .unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].latency_ms, 10.0);
    assert_eq!(samples[1].loss_percent, 2.0);
    assert!(samples[1].start_time.is_none());
}

#[tokio::test]
async fn test_list_device_clients() {
    let (server, client) = setup().await;

    let body = json!([
        { "description": "laptop", "usage": { "sent": 1000.0, "recv": 2000.0 },
          "ip": "10.0.0.5", "mac": "aa:bb:cc:dd:ee:ff" },
        { "description": null, "usage": { "sent": 10.0, "recv": 15.0 } },
    ]);

    Mock::given(method("GET"))
        .and(path("/devices/Q2XX-AAAA-0001/clients"))
        .and(query_param("timespan", "86400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let clients = client
        .list_device_clients("Q2XX-AAAA-0001", 86_400)
        .await
        .unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].usage.sent, 1000.0);
    assert!(clients[1].description.is_none());
}

#[tokio::test]
async fn test_api_key_header_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("X-Cisco-Meraki-API-Key", "test-key-123"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = DashboardApi::from_api_key(
        &server.uri(),
        &secrecy::SecretString::from("test-key-123"),
        &TransportConfig::default(),
    )
    .unwrap();

    let orgs = client.list_organizations().await.unwrap();
    assert!(orgs.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_invalid_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_with_meraki_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_999/devices"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "errors": ["No such network"] })),
        )
        .mount(&server)
        .await;

    let result = client.list_network_devices("N_999").await;

    match result {
        Err(Error::Api {
            status,
            ref message,
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "No such network");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_with_multibyte_char_at_preview_cut() {
    let (server, client) = setup().await;

    // 199 ASCII bytes, then a two-byte char straddling the 200-byte mark.
    let mut raw = "x".repeat(199);
    raw.push('é');
    raw.push_str(" trailing garbage");

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw.clone()))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, &raw),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_reports_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
