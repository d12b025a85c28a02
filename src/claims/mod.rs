//! Claim handling
//!
//! Fraud scoring of claim messages and the staged intake pipeline that
//! validates, classifies, scores and numbers a claim.

pub mod fraud;
pub mod pipeline;

// Re-export commonly used types
pub use fraud::fraud_score;
pub use pipeline::{ClaimPipeline, ClaimStage, ClaimState};
