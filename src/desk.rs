//! Intake desk
//!
//! Front door for a new customer message: route it, put it in the queue and
//! tell the customer how long they will wait.

use crate::client::{QueueApi, RouterApi};
use crate::error::Result;
use crate::types::{QueueTicket, RouteDecision};
use crate::wait_time::{WaitEstimate, WaitEstimator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Outcome of taking in one customer message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeReceipt {
    pub route: RouteDecision,
    pub ticket: QueueTicket,
    /// Estimate computed locally from the ticket position
    pub estimated_wait: WaitEstimate,
}

/// Routes and enqueues incoming messages through the desk API
pub struct IntakeDesk {
    router: Arc<dyn RouterApi>,
    queue: Arc<dyn QueueApi>,
    estimator: WaitEstimator,
}

impl IntakeDesk {
    /// Create a desk on top of the routing and queue APIs
    pub fn new(
        router: Arc<dyn RouterApi>,
        queue: Arc<dyn QueueApi>,
        estimator: WaitEstimator,
    ) -> Self {
        Self {
            router,
            queue,
            estimator,
        }
    }

    /// Route the message, enqueue it and estimate the wait.
    ///
    /// Nothing is enqueued when routing fails.
    #[instrument(skip(self, message))]
    pub async fn intake(&self, phone: &str, message: &str, priority: i32) -> Result<IntakeReceipt> {
        let route = self.router.route_customer(phone, message).await?;
        let ticket = self.queue.add_to_queue(phone, message, priority).await?;
        let estimated_wait = self.estimator.estimate(ticket.position)?;

        info!(
            "Intake for {}: flow {:?}, entry {}, wait {}",
            phone, route.flow, ticket.queue_id, estimated_wait
        );

        Ok(IntakeReceipt {
            route,
            ticket,
            estimated_wait,
        })
    }
}
