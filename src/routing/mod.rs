//! Customer routing
//!
//! Local implementation of the routing rules the desk API applies: a keyword
//! intent classifier and the flow selection built on top of it.

pub mod decision;
pub mod intent;

// Re-export commonly used types
pub use decision::{decide_route, select_flow};
pub use intent::classify_intent;
