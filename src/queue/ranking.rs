//! Urgency ordering for queue entries
//!
//! Entries are ordered by ascending priority, then by ascending enqueue time.
//! The same ordering drives both [`rank`] and [`position_of`], so the position
//! reported for an entry always matches its index among distinct keys in the
//! ranked output.

use crate::error::Result;
use crate::types::QueueItem;
use crate::utils::parse_timestamp;
use crate::wait_time::{WaitEstimate, WaitEstimator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Anything that can be placed in the queue ordering
pub trait Prioritized {
    /// Urgency, lower is more urgent
    fn priority(&self) -> i32;

    /// Raw enqueue timestamp
    fn created_at(&self) -> &str;
}

impl Prioritized for QueueItem {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Sort key of an entry.
///
/// An unparsable timestamp becomes `None`, which orders before every valid
/// timestamp of the same priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    pub priority: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl RankKey {
    /// Compute the key of an entry
    pub fn of<T: Prioritized + ?Sized>(item: &T) -> Self {
        Self {
            priority: item.priority(),
            created_at: parse_timestamp(item.created_at()),
        }
    }

    /// Whether the timestamp failed to parse
    pub fn has_malformed_timestamp(&self) -> bool {
        self.created_at.is_none()
    }
}

/// Return a new sequence holding the entries in service order.
///
/// The input is left untouched. Entries with identical keys keep their
/// relative input order.
pub fn rank<T: Prioritized + Clone>(items: &[T]) -> Vec<T> {
    let mut keyed: Vec<(RankKey, &T)> = items
        .iter()
        .map(|item| (RankKey::of(item), item))
        .collect();

    let malformed = keyed
        .iter()
        .filter(|(key, _)| key.has_malformed_timestamp())
        .count();
    if malformed > 0 {
        debug!(
            "{} of {} entries have unparsable created_at, ranking them first within their priority",
            malformed,
            items.len()
        );
    }

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Number of entries in `items` that are served strictly before `target`:
/// lower priority, or same priority and earlier enqueue time.
pub fn position_of<I: Prioritized, T: Prioritized + ?Sized>(items: &[I], target: &T) -> usize {
    let target_key = RankKey::of(target);
    items
        .iter()
        .filter(|item| RankKey::of(*item) < target_key)
        .count()
}

/// A ranked entry annotated with where it stands and how long it will wait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<T> {
    /// Zero-based index in service order
    pub position: usize,
    pub estimated_wait: WaitEstimate,
    pub item: T,
}

/// Rank `items` and attach a wait estimate to each entry
pub fn rank_with_estimates<T: Prioritized + Clone>(
    items: &[T],
    estimator: &WaitEstimator,
) -> Result<Vec<RankedEntry<T>>> {
    rank(items)
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let estimated_wait = estimator.estimate(position as i64)?;
            Ok(RankedEntry {
                position,
                estimated_wait,
                item,
            })
        })
        .collect()
}
