//! Common types used throughout the queue client

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a queue entry by the desk API
pub type QueueId = i64;

/// Identifier of a customer record
pub type CustomerId = i64;

/// Number of failed attempts after which an entry is parked as `ERRO`
pub const MAX_ATTEMPTS: u32 = 3;

/// A pending unit of work as supplied by the caller.
///
/// Only `priority` and `created_at` take part in ranking. Any other field the
/// backend sends is kept in `extra` so ranked output can be written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QueueId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Lower value is more urgent
    pub priority: i32,
    /// Enqueue time, ISO-8601 as sent by the backend
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueueItem {
    /// Create a bare item with only the ranking fields set
    pub fn new(priority: i32, created_at: impl Into<String>) -> Self {
        Self {
            id: None,
            phone: None,
            message: None,
            priority,
            created_at: created_at.into(),
            extra: Map::new(),
        }
    }

    /// Attach an identifier
    pub fn with_id(mut self, id: QueueId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Lifecycle of a queue entry on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueueStatus {
    /// Waiting to be picked up
    Aguardando,
    /// Claimed by a worker
    Processando,
    /// Finished successfully
    Concluido,
    /// Gave up after too many failures
    Erro,
}

impl QueueStatus {
    /// Status an entry moves to after a failed attempt, given the number of
    /// failures it had before this one.
    pub fn after_failure(retry_count: u32) -> Self {
        if retry_count.saturating_add(1) >= MAX_ATTEMPTS {
            QueueStatus::Erro
        } else {
            QueueStatus::Aguardando
        }
    }

    /// Whether the entry will not be picked up again
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueStatus::Concluido | QueueStatus::Erro)
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Aguardando => write!(f, "AGUARDANDO"),
            QueueStatus::Processando => write!(f, "PROCESSANDO"),
            QueueStatus::Concluido => write!(f, "CONCLUIDO"),
            QueueStatus::Erro => write!(f, "ERRO"),
        }
    }
}

/// Response to an enqueue request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueTicket {
    pub queue_id: QueueId,
    /// Number of waiting entries ahead of this one
    pub position: i64,
    /// Free-form estimate produced by the backend
    pub estimated_wait: String,
}

/// An entry claimed from the head of the queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedItem {
    pub id: QueueId,
    pub phone: String,
    pub message: String,
    pub priority: i32,
}

/// Plain acknowledgement returned by state-changing calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

/// Coarse intent detected in a customer message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentCategory {
    /// Claim: accident, collision, theft
    Sinistro,
    /// Sales: quote, purchase, renewal
    Vendas,
    Neutro,
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentCategory::Sinistro => write!(f, "SINISTRO"),
            IntentCategory::Vendas => write!(f, "VENDAS"),
            IntentCategory::Neutro => write!(f, "NEUTRO"),
        }
    }
}

/// Customer as known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: CustomerId,
    pub name: String,
    pub has_active_policy: bool,
}

/// Conversation flow a customer is routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flow {
    Sinistro,
    SinistroIntake,
    Reativacao,
    Vendas,
    Triagem,
}

impl Flow {
    /// Name of the workflow that handles this flow
    pub fn subworkflow(&self) -> &'static str {
        match self {
            Flow::Sinistro => "process-sinistro",
            Flow::SinistroIntake => "collect-identity-and-policy",
            Flow::Reativacao => "process-reativacao",
            Flow::Vendas => "process-vendas",
            Flow::Triagem => "process-triagem",
        }
    }

    /// First action the workflow takes
    pub fn next_action(&self) -> NextAction {
        match self {
            Flow::Sinistro => NextAction::ValidatePolicy,
            Flow::SinistroIntake => NextAction::CollectIdAndPolicy,
            Flow::Reativacao => NextAction::OfferRenewal,
            Flow::Vendas => NextAction::CollectLeadInfo,
            Flow::Triagem => NextAction::AskIntent,
        }
    }
}

/// First step of the routed workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextAction {
    ValidatePolicy,
    CollectIdAndPolicy,
    OfferRenewal,
    CollectLeadInfo,
    AskIntent,
}

/// Where a customer message should go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub flow: Flow,
    pub subworkflow: String,
    pub customer_data: Option<CustomerProfile>,
    pub next_action: NextAction,
}

impl RouteDecision {
    /// Build the decision for a flow, filling in its workflow and action
    pub fn for_flow(flow: Flow, customer_data: Option<CustomerProfile>) -> Self {
        Self {
            flow,
            subworkflow: flow.subworkflow().to_string(),
            customer_data,
            next_action: flow.next_action(),
        }
    }
}

/// Desk API request bodies
/// Body of `POST /api/queue/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToQueueRequest {
    pub phone: String,
    pub message: String,
    pub priority: i32,
}

/// Body of `POST /api/queue/next`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextBatchRequest {
    #[serde(rename = "batchSize")]
    pub batch_size: u32,
}

/// Body of `POST /api/queue/{id}/error`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkErrorRequest {
    pub error: String,
}

/// Body of `POST /api/router/route`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub phone: String,
    pub message: String,
}
