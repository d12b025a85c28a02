//! Wait time estimation for queued customers
//!
//! This module turns a queue position and an average per-entry service time
//! into the estimate shown to customers.

pub mod estimator;

// Re-export commonly used types
pub use estimator::{
    estimate_wait, WaitEstimate, WaitEstimator, DEFAULT_AVG_SERVICE_SECONDS, WAIT_UNIT,
};
