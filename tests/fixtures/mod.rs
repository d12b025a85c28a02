//! Test fixtures: an in-process stub of the desk API and sample queue data

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use olga_queue::client::ApiClient;
use olga_queue::routing::decide_route;
use olga_queue::types::{CustomerProfile, QueueItem};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A request the stub received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
}

/// Stub of the desk API that records every request it receives
#[derive(Debug, Clone, Default)]
pub struct StubDesk {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    fail_status: Option<u16>,
    known_customer: Option<CustomerProfile>,
}

impl StubDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `status` and a plain-text body
    pub fn failing_with(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    /// Resolve every phone to `customer` when routing
    pub fn with_customer(mut self, customer: CustomerProfile) -> Self {
        self.known_customer = Some(customer);
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, path: String, body: Value) -> Option<Response> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest { path, body });
        }
        self.fail_status.map(|status| {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "stub failure").into_response()
        })
    }

    /// Serve the stub on an ephemeral port and return a client pointed at it
    pub async fn spawn(self) -> ApiClient {
        let app = Router::new()
            .route("/api/queue/add", post(add_handler))
            .route("/api/queue/next", post(next_handler))
            .route("/api/queue/{id}/complete", post(complete_handler))
            .route("/api/queue/{id}/error", post(error_handler))
            .route("/api/router/route", post(route_handler))
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap()
    }
}

async fn add_handler(State(stub): State<StubDesk>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = stub.record("/api/queue/add".to_string(), body) {
        return failure;
    }
    Json(json!({ "queue_id": 17, "position": 3, "estimated_wait": "~5 min" })).into_response()
}

async fn next_handler(State(stub): State<StubDesk>, Json(body): Json<Value>) -> Response {
    let batch = body["batchSize"].as_i64().unwrap_or(0);
    if let Some(failure) = stub.record("/api/queue/next".to_string(), body) {
        return failure;
    }
    let items: Vec<Value> = (1..=batch)
        .map(|id| {
            json!({
                "id": id,
                "phone": format!("+55119000000{}", id),
                "message": "preciso de ajuda",
                "priority": 5
            })
        })
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn complete_handler(
    State(stub): State<StubDesk>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = stub.record(format!("/api/queue/{}/complete", id), body) {
        return failure;
    }
    Json(json!({ "ok": true })).into_response()
}

async fn error_handler(
    State(stub): State<StubDesk>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = stub.record(format!("/api/queue/{}/error", id), body) {
        return failure;
    }
    Json(json!({ "ok": true })).into_response()
}

async fn route_handler(State(stub): State<StubDesk>, Json(body): Json<Value>) -> Response {
    let message = body["message"].as_str().unwrap_or_default().to_string();
    if let Some(failure) = stub.record("/api/router/route".to_string(), body) {
        return failure;
    }
    Json(decide_route(stub.known_customer.clone(), &message)).into_response()
}

/// A small waiting queue in arbitrary order
pub fn sample_items() -> Vec<QueueItem> {
    vec![
        QueueItem::new(5, "2024-05-01T10:00:00Z").with_id(1),
        QueueItem::new(1, "2024-05-01T10:07:00Z").with_id(2),
        QueueItem::new(5, "2024-05-01T09:30:00Z").with_id(3),
        QueueItem::new(3, "2024-05-01T10:02:00Z").with_id(4),
        QueueItem::new(1, "2024-05-01T10:05:00Z").with_id(5),
    ]
}
