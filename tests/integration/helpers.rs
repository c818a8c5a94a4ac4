//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, BodyDataStream};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use futures::StreamExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use relay_auth::PasswordHasher;
use relay_core::config::AppConfig;
use relay_core::types::ApplicationId;
use relay_database::{DocumentStore, SeedData};

/// Seed fixture shipped with the server.
const SEED: &str = include_str!("../../config/seed.json");

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for direct inspection
    pub store: DocumentStore,
    /// Application config
    pub config: AppConfig,
}

/// Parsed response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over the seed fixture
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.dispatch.timeout_seconds = 2;

        let store = DocumentStore::new();
        let hasher = PasswordHasher::new();
        SeedData::from_json(SEED)
            .expect("Failed to parse seed")
            .apply(&store, |password| hasher.hash_password(password))
            .expect("Failed to apply seed");

        let state =
            relay_api::build_state(config.clone(), &store).expect("Failed to build state");
        Self {
            router: relay_api::build_app(state),
            store,
            config,
        }
    }

    /// Log in as a seeded user and return the session token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": "password123" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Send a JSON request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, token).await
    }

    /// Sends `body` as-is with a JSON content type.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body_str: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a notification owned by the token's user and return its id
    pub async fn create_draft(&self, token: &str, title: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/notifications/create",
                Some(json!({
                    "title": title,
                    "content": "<p>Release notes</p>",
                    "jiraReleaseNotes": "REL-100",
                    "isDraft": true,
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {}", response.body);
        response.body["notification"]["id"]
            .as_i64()
            .expect("notification id")
    }

    /// Point a seeded application at another base URL
    pub fn point_application(&self, id: i64, base_url: &str) {
        self.store
            .applications
            .modify(ApplicationId::new(id), |app| {
                app.base_url = base_url.to_string();
            })
            .expect("application exists");
    }

    /// Open the live event stream
    pub async fn open_events(&self, token: &str) -> (StatusCode, EventReader) {
        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/events?token={token}"))
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        (
            status,
            EventReader {
                stream: response.into_body().into_data_stream(),
                buffer: String::new(),
            },
        )
    }
}

/// Reads JSON events off a server-sent event body
pub struct EventReader {
    stream: BodyDataStream,
    buffer: String,
}

impl EventReader {
    /// Next `data:` event, skipping keep-alive comments
    pub async fn next_event(&mut self) -> Value {
        loop {
            if let Some(end) = self.buffer.find("\n\n") {
                let block: String = self.buffer.drain(..end + 2).collect();
                let data: Vec<&str> = block
                    .lines()
                    .filter_map(|line| line.strip_prefix("data:"))
                    .map(str::trim_start)
                    .collect();
                if data.is_empty() {
                    continue;
                }
                return serde_json::from_str(&data.join("\n")).expect("event is JSON");
            }
            let chunk = tokio::time::timeout(Duration::from_secs(5), self.stream.next())
                .await
                .expect("timed out waiting for event")
                .expect("event stream ended")
                .expect("event stream error");
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }
}

/// A request received by a stub external application
#[derive(Debug, Clone)]
pub struct Received {
    pub authorization: Option<String>,
    pub source_header: Option<String>,
    pub body: Value,
}

/// Start a stub external application that answers every dispatch with
/// `status`. Returns its base URL and the requests it received.
pub async fn spawn_receiver(status: StatusCode) -> (String, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));

    async fn record(
        State((status, received)): State<(StatusCode, Arc<Mutex<Vec<Received>>>)>,
        headers: HeaderMap,
        axum::Json(body): axum::Json<Value>,
    ) -> (StatusCode, axum::Json<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        received.lock().expect("lock").push(Received {
            authorization: header("authorization"),
            source_header: header("x-pm-interface-source"),
            body,
        });
        (status, axum::Json(json!({ "received": true })))
    }

    let app = Router::new()
        .route("/api/notifications", post(record))
        .with_state((status, Arc::clone(&received)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind receiver");
    let addr = listener.local_addr().expect("receiver addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), received)
}

/// Base URL nothing listens on
pub const UNREACHABLE: &str = "http://127.0.0.1:1";
