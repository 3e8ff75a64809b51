use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use busywork_config::SimulationConfig;
use busywork_interfaces::{Framework, StatisticsStore};
use busywork_rest_api::{create_rest_app, AppConfig};
use busywork_storage::InMemoryStatisticsStore;
use busywork_web::REQUEST_ID_HEADER;
use serde_json::Value;
use std::sync::Arc;

fn server_with(config: AppConfig) -> (TestServer, Arc<InMemoryStatisticsStore>) {
    let store = Arc::new(InMemoryStatisticsStore::new());
    let app = create_rest_app(store.clone() as Arc<dyn StatisticsStore>, config);
    (TestServer::new(app).unwrap(), store)
}

fn server() -> (TestServer, Arc<InMemoryStatisticsStore>) {
    server_with(AppConfig::default())
}

#[tokio::test]
async fn test_hello_for_every_variant() {
    let (server, store) = server();

    for (path, expected) in [
        ("/quarkus", "Quarkus: hello"),
        ("/micronaut", "Micronaut: hello"),
        ("/springboot", "Spring Boot: hello"),
    ] {
        let response = server.get(path).await;
        response.assert_status_ok();
        response.assert_text(expected);

        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));

        // Idempotent, no side effects
        server.get(path).await.assert_text(expected);
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_cpu_without_persistence() {
    let (server, store) = server();

    let response = server.get("/quarkus/cpu?iterations=1").await;
    response.assert_status_ok();

    let text = response.text();
    assert!(text.starts_with("Quarkus: CPU consumption is done with 1 iterations in "));
    assert!(text.ends_with("nano-seconds."));

    let nanos: u128 = text
        .trim_start_matches("Quarkus: CPU consumption is done with 1 iterations in ")
        .trim_end_matches(" nano-seconds.")
        .parse()
        .unwrap();
    assert!(nanos >= 20_000_000, "one iteration pauses for 20ms, got {}ns", nanos);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_cpu_defaults_for_missing_or_malformed_iterations() {
    let config = AppConfig {
        simulation: SimulationConfig {
            default_iterations: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let (server, _store) = server_with(config);

    let response = server.get("/micronaut/cpu").await;
    response.assert_status_ok();
    assert!(response.text().starts_with("Micronaut: CPU consumption is done with 2 iterations in "));

    let response = server.get("/micronaut/cpu?iterations=lots").await;
    response.assert_status_ok();
    assert!(response.text().contains("with 2 iterations"));
}

#[tokio::test]
async fn test_cpu_with_persistence_stores_record() {
    let (server, _store) = server();

    let response = server
        .get("/quarkus/cpu")
        .add_query_param("iterations", 1)
        .add_query_param("db", "true")
        .add_query_param("desc", "secret-marker")
        .await;
    response.assert_status_ok();

    let text = response.text();
    assert!(text.starts_with("Quarkus: CPU consumption is done with 1 iterations in "));
    assert!(text.ends_with("The result is persisted in the database."));
    assert!(!text.contains("secret-marker"));

    let stats: Vec<Value> = server.get("/quarkus/stats").await.json();
    assert_eq!(stats.len(), 1);

    let record = &stats[0];
    assert!(record["id"].as_i64().unwrap() > 0);
    assert_eq!(record["framework"], "QUARKUS");
    assert_eq!(record["kind"], "CPU");
    assert_eq!(record["parameter"], "1");
    assert_eq!(record["description"], "secret-marker");
    assert!(record["elapsedNanos"].as_u64().unwrap() >= 20_000_000);
    assert!(record["recordedAt"].is_string());
}

#[tokio::test]
async fn test_memory_with_and_without_persistence() {
    let (server, _store) = server();

    let response = server.get("/springboot/memory?bites=1").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.starts_with("Spring Boot: Memory consumption is done with 1 bites in "));
    assert!(text.ends_with("nano-seconds."));

    let response = server.get("/springboot/memory?bites=2&db=true").await;
    response.assert_status_ok();
    assert!(response.text().ends_with("The result is persisted in the database."));

    let stats: Vec<Value> = server.get("/springboot/stats").await.json();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["kind"], "MEMORY");
    assert_eq!(stats[0]["parameter"], "2");
    assert_eq!(stats[0]["framework"], "SPRINGBOOT");
    assert!(stats[0]["description"].is_null());
}

#[tokio::test]
async fn test_only_true_enables_persistence() {
    let (server, store) = server();

    for db in ["yes", "1", "false", ""] {
        let response = server.get(&format!("/quarkus/cpu?iterations=0&db={}", db)).await;
        response.assert_status_ok();
        assert!(response.text().ends_with("nano-seconds."));
    }
    assert!(store.is_empty().await);

    let response = server.get("/quarkus/cpu?iterations=0&db=TRUE").await;
    assert!(response.text().ends_with("persisted in the database."));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_n_persisted_calls_give_n_records_per_variant() {
    let (server, _store) = server();

    for _ in 0..3 {
        server.get("/micronaut/cpu?iterations=0&db=true").await.assert_status_ok();
    }
    server.get("/micronaut/memory?bites=1&db=true").await.assert_status_ok();
    server.get("/quarkus/memory?bites=1&db=true").await.assert_status_ok();

    let micronaut: Vec<Value> = server.get("/micronaut/stats").await.json();
    assert_eq!(micronaut.len(), 4);
    assert!(micronaut.iter().all(|r| r["framework"] == "MICRONAUT"));

    let ids: Vec<i64> = micronaut.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    let quarkus: Vec<Value> = server.get("/quarkus/stats").await.json();
    assert_eq!(quarkus.len(), 1);

    let springboot: Vec<Value> = server.get("/springboot/stats").await.json();
    assert!(springboot.is_empty());
}

#[tokio::test]
async fn test_negative_magnitude_is_a_no_op() {
    let (server, _store) = server();

    let response = server.get("/quarkus/cpu?iterations=-3&db=true").await;
    response.assert_status_ok();
    assert!(response.text().starts_with("Quarkus: CPU consumption is done with -3 iterations in "));

    let stats: Vec<Value> = server.get("/quarkus/stats").await.json();
    assert_eq!(stats[0]["parameter"], "0");
}

#[tokio::test]
async fn test_memory_guard_rejects_large_requests() {
    let config = AppConfig {
        simulation: SimulationConfig {
            default_bites: 1,
            max_bites: Some(4),
            ..Default::default()
        },
        ..Default::default()
    };
    let (server, store) = server_with(config);

    let response = server.get("/quarkus/memory?bites=5&db=true").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["status"], 400);
    assert!(store.is_empty().await);

    server.get("/quarkus/memory?bites=4").await.assert_status_ok();
}

#[tokio::test]
async fn test_unsatisfiable_memory_request_fails_alone() {
    let (server, store) = server();

    let response = server
        .get("/micronaut/memory?bites=9223372036854775807&db=true")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(store.is_empty().await);

    // Every variant keeps serving
    server.get("/quarkus").await.assert_text("Quarkus: hello");
    server.get("/micronaut/memory?bites=1").await.assert_status_ok();
}

#[tokio::test]
async fn test_unknown_and_unmounted_routes() {
    let config = AppConfig {
        variants: vec![Framework::Quarkus],
        ..Default::default()
    };
    let (server, _store) = server_with(config);

    server.get("/quarkus").await.assert_status_ok();
    server.get("/micronaut").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/quarkus/gpu").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (server, _store) = server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["variants"].as_array().unwrap().len(), 3);

    let response = server.get("/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (server, _store) = server();

    let response = server
        .get("/quarkus")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me"),
        )
        .await;
    assert_eq!(response.header(REQUEST_ID_HEADER), "trace-me");
}
