//! Claim intake pipeline
//!
//! A claim moves through a fixed sequence of stages. Each stage records its
//! outcome on the [`ClaimState`] so callers can see how far a claim got.

use crate::claims::fraud::fraud_score;
use crate::routing::classify_intent;
use crate::types::{CustomerProfile, IntentCategory};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Prefix of generated claim protocols
pub const PROTOCOL_PREFIX: &str = "SIN";

/// Stages of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStage {
    ValidatePolicy,
    ClassifyClaim,
    AnalyzeFraud,
    GenerateProtocol,
    SendResponse,
}

impl ClaimStage {
    /// All stages in the order they run
    pub const ALL: [ClaimStage; 5] = [
        ClaimStage::ValidatePolicy,
        ClaimStage::ClassifyClaim,
        ClaimStage::AnalyzeFraud,
        ClaimStage::GenerateProtocol,
        ClaimStage::SendResponse,
    ];
}

/// Everything known about a claim while it is being processed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimState {
    pub phone: String,
    pub message: String,
    pub customer_data: Option<CustomerProfile>,
    pub policy_validated: bool,
    pub claim_classified: bool,
    pub intent: Option<IntentCategory>,
    pub fraud_analyzed: bool,
    pub fraud_score: Option<u32>,
    pub protocol: Option<String>,
    pub response_sent: bool,
}

impl ClaimState {
    /// Start a claim for a message
    pub fn new(
        phone: impl Into<String>,
        message: impl Into<String>,
        customer_data: Option<CustomerProfile>,
    ) -> Self {
        Self {
            phone: phone.into(),
            message: message.into(),
            customer_data,
            ..Default::default()
        }
    }
}

/// Runs claims through every [`ClaimStage`] and issues protocol numbers
#[derive(Debug)]
pub struct ClaimPipeline {
    next_sequence: AtomicU64,
}

impl ClaimPipeline {
    /// Create a pipeline whose first protocol uses `first_sequence`
    pub fn new(first_sequence: u64) -> Self {
        Self {
            next_sequence: AtomicU64::new(first_sequence),
        }
    }

    /// Run all stages and return the final state
    pub fn run(&self, mut state: ClaimState) -> ClaimState {
        for stage in ClaimStage::ALL {
            self.apply(stage, &mut state);
            debug!("Claim from {} passed stage {:?}", state.phone, stage);
        }

        info!(
            "Claim {} processed (policy validated: {}, fraud score: {:?})",
            state.protocol.as_deref().unwrap_or("-"),
            state.policy_validated,
            state.fraud_score
        );
        state
    }

    fn apply(&self, stage: ClaimStage, state: &mut ClaimState) {
        match stage {
            ClaimStage::ValidatePolicy => {
                state.policy_validated = state.customer_data.is_some();
            }
            ClaimStage::ClassifyClaim => {
                state.intent = Some(classify_intent(&state.message));
                state.claim_classified = true;
            }
            ClaimStage::AnalyzeFraud => {
                state.fraud_score = Some(fraud_score(&state.message));
                state.fraud_analyzed = true;
            }
            ClaimStage::GenerateProtocol => {
                state.protocol = Some(self.next_protocol());
            }
            ClaimStage::SendResponse => {
                state.response_sent = true;
            }
        }
    }

    fn next_protocol(&self) -> String {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}{:06}", PROTOCOL_PREFIX, sequence)
    }
}

impl Default for ClaimPipeline {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known_customer() -> CustomerProfile {
        CustomerProfile {
            id: 1,
            name: "João".to_string(),
            has_active_policy: true,
        }
    }

    #[test]
    fn test_full_run() {
        let pipeline = ClaimPipeline::default();
        let state = pipeline.run(ClaimState::new(
            "+5511988887777",
            "Batida urgente na marginal",
            Some(known_customer()),
        ));

        assert!(state.policy_validated);
        assert!(state.claim_classified);
        assert_eq!(state.intent, Some(IntentCategory::Sinistro));
        assert!(state.fraud_analyzed);
        assert_eq!(state.fraud_score, Some(45));
        assert_eq!(state.protocol.as_deref(), Some("SIN000001"));
        assert!(state.response_sent);
    }

    #[test]
    fn test_unknown_customer_is_not_validated() {
        let state = ClaimPipeline::default().run(ClaimState::new("+55", "roubo", None));
        assert!(!state.policy_validated);
        assert!(state.response_sent);
    }

    #[test]
    fn test_protocols_are_sequential() {
        let pipeline = ClaimPipeline::new(41);
        let first = pipeline.run(ClaimState::new("a", "x", None));
        let second = pipeline.run(ClaimState::new("b", "y", None));
        assert_eq!(first.protocol.as_deref(), Some("SIN000041"));
        assert_eq!(second.protocol.as_deref(), Some("SIN000042"));
    }
}
