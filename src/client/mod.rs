//! HTTP wrappers for the desk API
//!
//! The backend at `API_BASE` owns queueing, routing and persistence. These
//! wrappers forward calls to it over JSON/HTTP.

pub mod customer_router;
pub mod http;
pub mod queue_manager;

// Re-export commonly used types
pub use customer_router::{CustomerRouter, RouterApi};
pub use http::ApiClient;
pub use queue_manager::{QueueApi, QueueManager};
