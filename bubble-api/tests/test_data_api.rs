//! Integration tests for the Data API client.
//!
//! Each test drives a real `DataApiClient` against an in-process mock of
//! the provider, covering pagination, constraint/sort serialization,
//! environment selection, write pass-through, and error surfacing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use bubble_api::{Constraint, DataApiClient, SortOption};
use bubble_core::config::ApiConfig;
use bubble_core::error::BubbleError;

const API_KEY: &str = "test-key";
const PAGE_SIZE: u64 = 100;

/// One request as observed by the mock provider.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    params: HashMap<String, String>,
    body: Option<Value>,
}

struct MockProvider {
    /// Number of synthetic records the provider holds per data type.
    total: u64,
    requests: Mutex<Vec<Recorded>>,
}

impl MockProvider {
    fn record(&self, method: &str, path: &str, params: HashMap<String, String>, body: Option<Value>) {
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: path.to_string(),
            params,
            body,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"))
}

async fn list_records(
    State(state): State<Arc<MockProvider>>,
    Path(object): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"statusCode": 401}))).into_response();
    }
    state.record("GET", uri.path(), params.clone(), None);

    match object.as_str() {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "garbled" => (StatusCode::OK, "this is not json").into_response(),
        _ => {
            let cursor: u64 = params
                .get("cursor")
                .and_then(|c| c.parse().ok())
                .unwrap_or(0);
            let end = state.total.min(cursor.saturating_add(PAGE_SIZE));
            let results: Vec<Value> = (cursor.min(end)..end)
                .map(|i| json!({"_id": format!("rec-{i}"), "index": i}))
                .collect();
            let count = results.len() as u64;
            let remaining = state.total.saturating_sub(cursor + count);
            Json(json!({
                "response": {"results": results, "count": count, "remaining": remaining}
            }))
            .into_response()
        }
    }
}

async fn create_record(
    State(state): State<Arc<MockProvider>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"statusCode": 401}))).into_response();
    }
    state.record("POST", uri.path(), HashMap::new(), Some(body));
    (
        StatusCode::CREATED,
        Json(json!({"status": "success", "id": "1700000000000x1"})),
    )
        .into_response()
}

async fn update_record(
    State(state): State<Arc<MockProvider>>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Value>,
) -> Response {
    state.record("PATCH", uri.path(), HashMap::new(), Some(body));
    StatusCode::NO_CONTENT.into_response()
}

async fn replace_record(
    State(state): State<Arc<MockProvider>>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Value>,
) -> Response {
    state.record("PUT", uri.path(), HashMap::new(), Some(body));
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_records(
    State(state): State<Arc<MockProvider>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    state.record("DELETE", uri.path(), HashMap::new(), None);
    StatusCode::NO_CONTENT.into_response()
}

async fn spawn_provider(total: u64) -> (Arc<MockProvider>, SocketAddr) {
    let state = Arc::new(MockProvider {
        total,
        requests: Mutex::new(Vec::new()),
    });

    let router = Router::new()
        .route(
            "/api/1.1/obj/{object}",
            get(list_records)
                .post(create_record)
                .patch(update_record)
                .put(replace_record)
                .delete(delete_records),
        )
        .route("/version-test/api/1.1/obj/{object}", get(list_records))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (state, addr)
}

fn client_for(addr: SocketAddr, is_dev: bool) -> DataApiClient {
    let config = ApiConfig {
        domain: format!("http://{addr}"),
        api_key: API_KEY.into(),
        is_dev,
        timeout_ms: 5_000,
    };
    DataApiClient::new(&config).unwrap()
}

// ---- Pagination ----

#[tokio::test]
async fn single_page_fetch_issues_one_request() {
    let (state, addr) = spawn_provider(42).await;
    let client = client_for(addr, false);

    let records = client.fetch_all("task").await.unwrap();
    assert_eq!(records.len(), 42);
    assert_eq!(records[0]["_id"], json!("rec-0"));

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].params.contains_key("cursor"));
}

#[tokio::test]
async fn multi_page_fetch_appends_pages_in_order() {
    let (state, addr) = spawn_provider(350).await;
    let client = client_for(addr, false);

    let records = client.fetch_all("task").await.unwrap();
    assert_eq!(records.len(), 350);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["index"], json!(i as u64), "out of order at {i}");
    }

    // Probe without a cursor, then the full cursor walk.
    let cursors: Vec<Option<String>> = state
        .requests()
        .iter()
        .map(|r| r.params.get("cursor").cloned())
        .collect();
    assert_eq!(cursors[0], None);
    let walked: Vec<u64> = cursors[1..]
        .iter()
        .map(|c| c.as_deref().unwrap().parse().unwrap())
        .collect();
    assert_eq!(walked, vec![0, 100, 200, 300, 400]);
}

#[tokio::test]
async fn empty_object_fetch_returns_no_records() {
    let (state, addr) = spawn_provider(0).await;
    let client = client_for(addr, false);

    let records = client.fetch_all("task").await.unwrap();
    assert!(records.is_empty());
    assert_eq!(state.requests().len(), 1);
}

#[tokio::test]
async fn filtered_multi_page_fetch_keeps_query_on_every_request() {
    let (state, addr) = spawn_provider(150).await;
    let client = client_for(addr, false);

    let constraints = vec![Constraint::equals("status", "active")];
    let sort = SortOption::descending("created_at");
    let records = client
        .fetch_all_filtered("task", &constraints, Some(&sort))
        .await
        .unwrap();
    assert_eq!(records.len(), 150);

    for request in state.requests() {
        assert!(
            request.params.contains_key("constraints"),
            "constraints dropped on {:?}",
            request.params
        );
        assert_eq!(request.params.get("sort_field").unwrap(), "created_at");
    }
}

// ---- Query serialization ----

#[tokio::test]
async fn constraints_and_sort_reach_the_wire() {
    let (state, addr) = spawn_provider(3).await;
    let client = client_for(addr, false);

    let constraints = vec![Constraint::equals("status", "active")];
    let sort = SortOption::descending("created_at");
    client
        .fetch_all_filtered("task", &constraints, Some(&sort))
        .await
        .unwrap();

    let requests = state.requests();
    let params = &requests[0].params;
    assert_eq!(
        params.get("constraints").unwrap(),
        r#"[{"key":"status","constraint_type":"equals","value":"active"}]"#
    );
    assert_eq!(params.get("sort_field").unwrap(), "created_at");
    assert_eq!(params.get("descending").unwrap(), "true");
}

#[tokio::test]
async fn ascending_sort_sends_descending_false() {
    let (state, addr) = spawn_provider(1).await;
    let client = client_for(addr, false);

    client
        .fetch_all_filtered("task", &[], Some(&SortOption::ascending("name")))
        .await
        .unwrap();

    let requests = state.requests();
    assert_eq!(requests[0].params.get("descending").unwrap(), "false");
}

// ---- Environment selection ----

#[tokio::test]
async fn dev_client_targets_version_test() {
    let (state, addr) = spawn_provider(5).await;

    let records = client_for(addr, true).fetch_all("task").await.unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(state.requests()[0].path, "/version-test/api/1.1/obj/task");

    let records = client_for(addr, false).fetch_all("task").await.unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(state.requests()[1].path, "/api/1.1/obj/task");
}

// ---- Writes ----

#[tokio::test]
async fn create_sends_body_and_returns_provider_response() {
    let (state, addr) = spawn_provider(0).await;
    let client = client_for(addr, false);

    let body = json!({"title": "write the report", "done": false});
    let response = client.create("task", &body).await.unwrap();
    assert_eq!(response, json!({"status": "success", "id": "1700000000000x1"}));

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].body.as_ref().unwrap(), &body);
}

#[tokio::test]
async fn update_and_replace_use_patch_and_put() {
    let (state, addr) = spawn_provider(0).await;
    let client = client_for(addr, false);

    let body = json!({"done": true});
    assert_eq!(client.update("task", &body).await.unwrap(), Value::Null);
    assert_eq!(client.replace("task", &body).await.unwrap(), Value::Null);

    let methods: Vec<String> = state.requests().iter().map(|r| r.method.clone()).collect();
    assert_eq!(methods, vec!["PATCH", "PUT"]);
}

#[tokio::test]
async fn delete_issues_exactly_one_request() {
    // A large record count must not make DELETE paginate.
    let (state, addr) = spawn_provider(350).await;
    let client = client_for(addr, false);

    let response = client.remove("task").await.unwrap();
    assert_eq!(response, Value::Null);

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/1.1/obj/task");
}

// ---- Error surfacing ----

#[tokio::test]
async fn connection_failure_is_a_typed_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, false);
    let err = client.fetch_all("task").await.unwrap_err();
    assert!(matches!(err, BubbleError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn bad_api_key_is_an_auth_error() {
    let (_state, addr) = spawn_provider(10).await;
    let config = ApiConfig {
        domain: format!("http://{addr}"),
        api_key: "wrong-key".into(),
        is_dev: false,
        timeout_ms: 5_000,
    };
    let client = DataApiClient::new(&config).unwrap();

    let err = client.fetch_all("task").await.unwrap_err();
    assert!(matches!(err, BubbleError::Auth { status: 401 }), "got {err:?}");
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let (_state, addr) = spawn_provider(10).await;
    let client = client_for(addr, false);

    let err = client.fetch_all("boom").await.unwrap_err();
    match err {
        BubbleError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (_state, addr) = spawn_provider(10).await;
    let client = client_for(addr, false);

    let err = client.fetch_all("garbled").await.unwrap_err();
    assert!(matches!(err, BubbleError::Decode(_)), "got {err:?}");
}
