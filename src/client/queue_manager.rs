//! Queue operations against the desk API
//!
//! The backend owns the queue itself; this wrapper only serialises requests,
//! decodes responses and turns non-2xx statuses into errors.

use crate::client::http::ApiClient;
use crate::error::Result;
use crate::types::{
    Ack, AddToQueueRequest, ClaimedItem, MarkErrorRequest, NextBatchRequest, QueueId, QueueTicket,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Error text sent when the caller has none
pub const UNKNOWN_ERROR: &str = "unknown";

/// Queue operations exposed by the desk API
#[async_trait]
pub trait QueueApi: Send + Sync {
    /// Enqueue a customer message; the backend deduplicates waiting entries
    /// per phone and reports the entry's position.
    async fn add_to_queue(&self, phone: &str, message: &str, priority: i32)
        -> Result<QueueTicket>;

    /// Claim up to `batch_size` entries from the head of the queue
    async fn get_next(&self, batch_size: u32) -> Result<Vec<ClaimedItem>>;

    /// Mark a claimed entry as done, attaching an optional result document
    async fn mark_completed(&self, queue_id: QueueId, result: Option<Value>) -> Result<Ack>;

    /// Report a failed attempt on a claimed entry
    async fn mark_error(&self, queue_id: QueueId, error: Option<String>) -> Result<Ack>;
}

/// HTTP implementation of [`QueueApi`]
#[derive(Debug, Clone)]
pub struct QueueManager {
    api: ApiClient,
}

impl QueueManager {
    /// Create a queue manager on top of a configured API client
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Body sent on completion. Empty results (`null`, `false`, `0`, `""`) are
/// replaced by `{"status":"OK"}`.
fn completion_body(result: Option<Value>) -> Value {
    match result {
        Some(result) if !is_empty_result(&result) => result,
        _ => json!({ "status": "OK" }),
    }
}

fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Error text for a failure report; empty strings count as missing
fn error_text(error: Option<&str>) -> String {
    match error {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => UNKNOWN_ERROR.to_string(),
    }
}

#[async_trait]
impl QueueApi for QueueManager {
    #[instrument(skip(self, message))]
    async fn add_to_queue(
        &self,
        phone: &str,
        message: &str,
        priority: i32,
    ) -> Result<QueueTicket> {
        let body = AddToQueueRequest {
            phone: phone.to_string(),
            message: message.to_string(),
            priority,
        };
        let ticket: QueueTicket = self
            .api
            .post_json("add_to_queue", "/api/queue/add", &body)
            .await?;

        info!(
            "Queued {} as entry {} at position {}",
            phone, ticket.queue_id, ticket.position
        );
        Ok(ticket)
    }

    #[instrument(skip(self))]
    async fn get_next(&self, batch_size: u32) -> Result<Vec<ClaimedItem>> {
        let body = NextBatchRequest { batch_size };
        let items: Vec<ClaimedItem> = self
            .api
            .post_json("get_next", "/api/queue/next", &body)
            .await?;

        info!("Claimed {} entries (batch size {})", items.len(), batch_size);
        Ok(items)
    }

    #[instrument(skip(self, result))]
    async fn mark_completed(&self, queue_id: QueueId, result: Option<Value>) -> Result<Ack> {
        let path = format!("/api/queue/{}/complete", queue_id);
        self.api
            .post_json("mark_completed", &path, &completion_body(result))
            .await
    }

    #[instrument(skip(self))]
    async fn mark_error(&self, queue_id: QueueId, error: Option<String>) -> Result<Ack> {
        let path = format!("/api/queue/{}/error", queue_id);
        let body = MarkErrorRequest {
            error: error_text(error.as_deref()),
        };
        self.api.post_json("mark_error", &path, &body).await
    }
}
