/// HTTP surface tests
/// Drives the router in-process against a mocked upstream
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sim_lookup_api::client::LookupClient;
use sim_lookup_api::config::ProviderConfig;
use sim_lookup_api::counter::{MemoryVisitCounter, VisitCounter};
use sim_lookup_api::handlers::AppState;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_state(server: &MockServer, counter: Arc<MemoryVisitCounter>) -> Arc<AppState> {
    let lookup_client = LookupClient::new(
        server.uri(),
        ProviderConfig::ResultApi {
            api_key: "test_key".to_string(),
        },
        None,
    )
    .unwrap();

    Arc::new(AppState {
        lookup_client,
        visit_counter: counter,
    })
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = sim_lookup_api::app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;
    let state = test_state(&mock_server, Arc::new(MemoryVisitCounter::new()));

    let (status, body) = get_json(state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sim-lookup-api");
}

#[tokio::test]
async fn test_lookup_success_counts_visit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"name": "Ali", "number": "3001234567"}
        })))
        .mount(&mock_server)
        .await;

    let counter = Arc::new(MemoryVisitCounter::new());
    let state = test_state(&mock_server, counter.clone());

    let (status, body) = get_json(state, "/api/v1/lookup?mobile=03001234567").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["records"][0]["name"], "Ali");
    assert_eq!(body["records"][0]["cnic"], "N/A");
    assert_eq!(body["records"][0]["operator"], "N/A");
    assert_eq!(counter.get().await.unwrap(), 1);
}

#[tokio::test]
async fn test_lookup_failure_does_not_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "No SIM data found."
        })))
        .mount(&mock_server)
        .await;

    let counter = Arc::new(MemoryVisitCounter::new());
    let state = test_state(&mock_server, counter.clone());

    let (status, body) = get_json(state, "/api/v1/lookup?mobile=03001234567").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "failure");
    assert_eq!(body["kind"], "no_data_found");
    assert_eq!(body["reason"], "no data found");
    assert_eq!(counter.get().await.unwrap(), 0);
}

#[tokio::test]
async fn test_lookup_without_number_is_invalid() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let state = test_state(&mock_server, Arc::new(MemoryVisitCounter::new()));

    let (status, body) = get_json(state, "/api/v1/lookup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "invalid input");
}

#[tokio::test]
async fn test_stats() {
    let mock_server = MockServer::start().await;
    let counter = Arc::new(MemoryVisitCounter::new());
    counter.increment().await.unwrap();
    counter.increment().await.unwrap();
    let state = test_state(&mock_server, counter);

    let (status, body) = get_json(state, "/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visits"], 2);
    let active = body["active_users"].as_u64().unwrap();
    assert!((1..=50).contains(&active));
}

#[tokio::test]
async fn test_lookup_upstream_message_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "Daily quota exhausted"
        })))
        .mount(&mock_server)
        .await;

    let counter = Arc::new(MemoryVisitCounter::new());
    let state = test_state(&mock_server, counter.clone());

    let (status, body) = get_json(state, "/api/v1/lookup?mobile=03001234567").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "upstream_message");
    assert_eq!(body["reason"], "Daily quota exhausted");
    assert_eq!(counter.get().await.unwrap(), 0);
}
