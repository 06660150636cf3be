//! Shared test harness: an in-process stub storage collaborator plus the
//! full application router wired against it.
//!
//! The stub serves the collaborator's REST interface (select with
//! equality filters, insert, health probe) from an in-memory table map,
//! so integration tests exercise the real HTTP client and the same
//! middleware stack production uses. The reserved table name `broken`
//! always fails, for error-path tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use acehive_api::auth::jwt::JwtConfig;
use acehive_api::auth::revocation::RevocationList;
use acehive_api::config::ServerConfig;
use acehive_api::engine::SubmissionRegistry;
use acehive_api::routes;
use acehive_api::state::AppState;
use acehive_core::columns::SanitizePolicy;
use acehive_store::{StoreClient, StoreConfig};

// ---------------------------------------------------------------------------
// Stub storage collaborator
// ---------------------------------------------------------------------------

/// Table name the stub always fails on, for error-path tests.
pub const BROKEN_TABLE: &str = "broken";

/// In-memory tables behind the stub collaborator.
#[derive(Clone, Default)]
pub struct StubStore {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    broken: Arc<Mutex<std::collections::HashSet<String>>>,
}

impl StubStore {
    /// Replace a table's rows.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), rows);
    }

    /// Current rows of a table (empty if never seeded).
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every call touching this table fail from now on.
    pub fn break_table(&self, table: &str) {
        self.broken.lock().unwrap().insert(table.to_string());
    }

    fn is_broken(&self, table: &str) -> bool {
        table == BROKEN_TABLE || self.broken.lock().unwrap().contains(table)
    }
}

async fn stub_select(
    State(store): State<StubStore>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response<Body> {
    if store.is_broken(&table) {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage exploded");
    }

    let rows = store.rows(&table);
    let filtered: Vec<Value> = rows
        .into_iter()
        .filter(|row| {
            params.iter().all(|(column, condition)| {
                if column == "select" {
                    return true;
                }
                let Some(expected) = condition.strip_prefix("eq.") else {
                    return true;
                };
                row.get(column).and_then(Value::as_str) == Some(expected)
            })
        })
        .collect();

    Json(filtered).into_response()
}

async fn stub_insert(
    State(store): State<StubStore>,
    Path(table): Path<String>,
    Json(record): Json<Value>,
) -> Response<Body> {
    if store.is_broken(&table) {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "insert rejected by store");
    }

    store
        .tables
        .lock()
        .unwrap()
        .entry(table)
        .or_default()
        .push(record);
    StatusCode::CREATED.into_response()
}

async fn stub_root() -> Json<Value> {
    Json(json!({}))
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Serve the stub collaborator on a loopback port, returning its base URL.
pub async fn spawn_stub_store(store: StubStore) -> String {
    let app = Router::new()
        .route("/rest/v1/", get(stub_root))
        .route("/rest/v1/{table}", get(stub_select).post(stub_insert))
        .with_state(store);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub store");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub store died");
    });

    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Application under test
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, pointed
/// at the stub collaborator.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store_url: &str) -> Router {
    let config = test_config();

    let store = StoreClient::new(&StoreConfig {
        base_url: store_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
    })
    .expect("failed to build store client");

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        revoked: Arc::new(RevocationList::new()),
        submissions: Arc::new(SubmissionRegistry::new()),
        sanitizer: Arc::new(SanitizePolicy::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Stub collaborator plus the app wired against it.
pub struct TestContext {
    pub app: Router,
    pub store: StubStore,
}

/// Spin up the stub store and the app. Seeds one staff credential
/// (`admin` / `secret`) into the `auth` table.
pub async fn setup() -> TestContext {
    let store = StubStore::default();
    store.seed(
        "auth",
        vec![json!({ "id": 1, "user": "admin", "pwd": "secret" })],
    );
    let url = spawn_stub_store(store.clone()).await;
    let app = build_test_app(&url);
    TestContext { app, store }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get_req(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an authenticated POST with an empty body (e.g. logout).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}

/// Log in as the seeded staff user and return the access token.
pub async fn login_token(app: &Router) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "admin", "password": "secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response missing access_token")
        .to_string()
}
