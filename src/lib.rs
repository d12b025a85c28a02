//! Olga Queue - customer-service desk client
//!
//! This crate ranks queue entries and estimates wait times, applies the
//! desk's routing and claim rules, and wraps the desk API's queue and routing
//! endpoints.

pub mod claims;
pub mod client;
pub mod config;
pub mod desk;
pub mod error;
pub mod queue;
pub mod routing;
pub mod types;
pub mod utils;
pub mod wait_time;

// Re-export commonly used types and traits
pub use error::{QueueError, Result};
pub use types::*;

// Re-export key components
pub use client::{CustomerRouter, QueueApi, QueueManager, RouterApi};
pub use desk::{IntakeDesk, IntakeReceipt};
pub use queue::{position_of, rank, Prioritized};
pub use wait_time::{estimate_wait, WaitEstimate, WaitEstimator, DEFAULT_AVG_SERVICE_SECONDS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
