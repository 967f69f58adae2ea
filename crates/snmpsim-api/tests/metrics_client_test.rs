#![allow(clippy::unwrap_used)]
// Integration tests for `MetricsClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use snmpsim_api::{Filter, MetricsClient};

async fn setup() -> (MockServer, MetricsClient) {
    let server = MockServer::start().await;
    let client = MetricsClient::new(&server.uri()).unwrap();
    (server, client)
}

fn metrics_path(suffix: &str) -> String {
    format!("/snmpsim/metrics/v1/{suffix}")
}

async fn mount_json(server: &MockServer, suffix: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(metrics_path(suffix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Processes ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_processes_with_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(metrics_path("processes")))
        .and(query_param("supervisor", "sim-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "path": "/usr/bin/snmpsim-command-responder",
            "runtime": 120,
            "cpu": 3,
            "memory": 4096,
            "files": 12,
            "exits": 0,
            "changes": 1,
            "update_interval": 5,
            "last_update": "2024-05-01T10:00:00",
            "console_pages": {"count": 3, "last_update": "2024-05-01T10:00:00"},
            "supervisor": {"hostname": "sim-1", "watch_dir": "/var/lib/snmpsim"}
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = Filter::new().with("supervisor", "sim-1");
    let processes = client.get_processes(Some(&filter)).await.unwrap();

    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].memory, 4096);
    assert_eq!(processes[0].console_pages.count, 3);
    assert_eq!(processes[0].supervisor.watch_dir, "/var/lib/snmpsim");
    assert_eq!(processes[0].lifecycle, None);
}

#[tokio::test]
async fn test_process_endpoints_and_console() {
    let (server, client) = setup().await;

    mount_json(
        &server,
        "processes/1/endpoints",
        json!([{"id": 1, "protocol": "udpv4", "address": "127.0.0.1:1161"}]),
    )
    .await;
    mount_json(
        &server,
        "processes/1/endpoints/1",
        json!({"id": 1, "protocol": "udpv4", "address": "127.0.0.1:1161"}),
    )
    .await;
    mount_json(
        &server,
        "processes/1/console",
        json!([{"id": 1, "timestamp": "2024-05-01T10:00:00", "text": "started"}]),
    )
    .await;
    mount_json(
        &server,
        "processes/1/console/1",
        json!({"id": 1, "timestamp": "2024-05-01T10:00:00", "text": "started"}),
    )
    .await;

    let endpoints = client.get_process_endpoints(1).await.unwrap();
    let endpoint = client.get_process_endpoint(1, 1).await.unwrap();
    assert_eq!(endpoints, vec![endpoint.clone()]);
    assert_eq!(endpoint.address, "127.0.0.1:1161");

    let pages = client.get_process_console_pages(1).await.unwrap();
    let page = client.get_process_console_page(1, 1).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(page.text, "started");
}

#[tokio::test]
async fn test_missing_process_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(metrics_path("processes/42")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "process not found", "status": 404})),
        )
        .mount(&server)
        .await;

    let err = client.get_process(42).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "http error: status code: 404 // status: 404 Not Found // message: process not found"
    );
}

// ── Activity ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_packets_leaves_unobserved_counters_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(metrics_path("activity/packets")))
        .and(query_param("local_address", "127.0.0.1:1161"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first_hit": 1_714_557_600,
            "last_hit": 1_714_557_660,
            "total": 250,
            "parse_failures": 2
        })))
        .mount(&server)
        .await;

    let filter = Filter::new().with("local_address", "127.0.0.1:1161");
    let packets = client.get_packets(Some(&filter)).await.unwrap();

    assert_eq!(packets.total, Some(250));
    assert_eq!(packets.parse_failures, Some(2));
    assert_eq!(packets.auth_failures, None);
    assert_eq!(packets.context_failures, None);
}

#[tokio::test]
async fn test_get_messages_with_variations() {
    let (server, client) = setup().await;

    mount_json(
        &server,
        "activity/messages",
        json!({
            "pdus": 10,
            "var_binds": 40,
            "failures": 0,
            "variations": [{"name": "writecache", "total": 4, "failures": 1}]
        }),
    )
    .await;

    let messages = client.get_messages(None).await.unwrap();
    assert_eq!(messages.var_binds, Some(40));
    assert_eq!(messages.variations[0].name.as_deref(), Some("writecache"));
    assert_eq!(messages.variations[0].first_hit, None);
}

#[tokio::test]
async fn test_filter_names_are_object_keys() {
    let (server, client) = setup().await;

    mount_json(
        &server,
        "activity/packets/filters",
        json!({
            "transport_protocol": "/snmpsim/metrics/v1/activity/packets/filters/transport_protocol",
            "local_address": "/snmpsim/metrics/v1/activity/packets/filters/local_address",
            "peer_address": {"nested": true}
        }),
    )
    .await;
    mount_json(
        &server,
        "activity/messages/filters",
        json!({"context_name": null, "pdu_type": 1}),
    )
    .await;

    assert_eq!(
        client.get_packet_filters().await.unwrap(),
        vec!["local_address", "peer_address", "transport_protocol"]
    );
    assert_eq!(
        client.get_message_filters().await.unwrap(),
        vec!["context_name", "pdu_type"]
    );
}

#[tokio::test]
async fn test_filter_values() {
    let (server, client) = setup().await;

    mount_json(
        &server,
        "activity/packets/filters/local_address",
        json!(["127.0.0.1:1161", "127.0.0.1:1162"]),
    )
    .await;
    mount_json(
        &server,
        "activity/messages/filters/pdu_type",
        json!(["GetRequest", "GetNextRequest"]),
    )
    .await;

    let addresses = client
        .get_packet_filter_values("local_address")
        .await
        .unwrap();
    assert_eq!(addresses, vec!["127.0.0.1:1161", "127.0.0.1:1162"]);

    let pdus = client.get_message_filter_values("pdu_type").await.unwrap();
    assert_eq!(pdus.len(), 2);
}

#[tokio::test]
async fn test_null_fields_in_responses_decode_as_defaults() {
    let (server, client) = setup().await;
    mount_json(
        &server,
        "processes/1",
        json!({"id": 1, "cpu": null, "path": null, "console_pages": null}),
    )
    .await;

    let process = client.get_process(1).await.unwrap();
    assert_eq!(process.id, 1);
    assert_eq!(process.cpu, 0);
    assert!(process.path.is_empty());
}
