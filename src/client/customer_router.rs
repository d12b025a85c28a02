//! Customer routing through the desk API

use crate::client::http::ApiClient;
use crate::error::Result;
use crate::types::{RouteDecision, RouteRequest};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Routing operation exposed by the desk API
#[async_trait]
pub trait RouterApi: Send + Sync {
    /// Decide which flow handles a customer's message
    async fn route_customer(&self, phone: &str, message: &str) -> Result<RouteDecision>;
}

/// HTTP implementation of [`RouterApi`]
#[derive(Debug, Clone)]
pub struct CustomerRouter {
    api: ApiClient,
}

impl CustomerRouter {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RouterApi for CustomerRouter {
    #[instrument(skip(self, message))]
    async fn route_customer(&self, phone: &str, message: &str) -> Result<RouteDecision> {
        let body = RouteRequest {
            phone: phone.to_string(),
            message: message.to_string(),
        };
        let decision: RouteDecision = self
            .api
            .post_json("route_customer", "/api/router/route", &body)
            .await?;

        info!("Routed {} to {:?}", phone, decision.flow);
        Ok(decision)
    }
}
