mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_ok() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/api/healthz").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert!(body["checks"]["store"].get("message").is_none());
}

#[tokio::test]
async fn test_health_store_down() {
    let server = common::create_failing_server();

    let response = server.get("/api/healthz").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["store"]["status"], "error");
}
