//! Queue ordering
//!
//! Ranking of queue entries by urgency and the position computation the
//! desk API uses when it reports where a customer stands.

pub mod ranking;

// Re-export commonly used types
pub use ranking::{position_of, rank, rank_with_estimates, Prioritized, RankKey, RankedEntry};
