//! Queue position to wait time conversion
//!
//! A wait estimate is `ceil(position * avg_service / 1 minute)` whole minutes,
//! shown to customers as `"<N> minutes"`.

use crate::error::{QueueError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Average time spent serving one entry when nothing else is configured
pub const DEFAULT_AVG_SERVICE_SECONDS: u64 = 60;

/// Unit suffix of rendered estimates
pub const WAIT_UNIT: &str = "minutes";

const NANOS_PER_MINUTE: u128 = 60_000_000_000;

/// An estimated wait in whole minutes, rounded up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WaitEstimate {
    pub minutes: u64,
}

impl WaitEstimate {
    /// The estimate as a duration
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.minutes.saturating_mul(60))
    }
}

impl std::fmt::Display for WaitEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.minutes, WAIT_UNIT)
    }
}

/// Converts queue positions into wait estimates for a fixed service time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitEstimator {
    avg_service: Duration,
}

impl WaitEstimator {
    /// Create an estimator; the average service time must be non-zero
    pub fn new(avg_service: Duration) -> Result<Self> {
        if avg_service.is_zero() {
            return Err(
                QueueError::invalid_argument("average service time must be greater than 0").into(),
            );
        }
        Ok(Self { avg_service })
    }

    /// Create an estimator from a number of seconds as received from callers
    pub fn from_secs_f64(avg_seconds: f64) -> Result<Self> {
        if !avg_seconds.is_finite() {
            return Err(QueueError::invalid_argument(format!(
                "average service seconds must be a finite number, got {}",
                avg_seconds
            ))
            .into());
        }
        if avg_seconds <= 0.0 {
            return Err(QueueError::invalid_argument(format!(
                "average service seconds must be greater than 0, got {}",
                avg_seconds
            ))
            .into());
        }
        let avg_service = Duration::try_from_secs_f64(avg_seconds).map_err(|e| {
            QueueError::invalid_argument(format!("average service seconds out of range: {}", e))
        })?;
        // Positive values below one nanosecond still cost some time
        Self::new(avg_service.max(Duration::from_nanos(1)))
    }

    /// Average service time per entry
    pub fn avg_service(&self) -> Duration {
        self.avg_service
    }

    /// Estimate the wait of an entry with `position` entries ahead of it
    pub fn estimate(&self, position: i64) -> Result<WaitEstimate> {
        let position = u128::try_from(position).map_err(|_| {
            QueueError::invalid_argument(format!("position must be >= 0, got {}", position))
        })?;

        let total_nanos = position
            .checked_mul(self.avg_service.as_nanos())
            .ok_or_else(|| QueueError::invalid_argument("wait estimate overflows"))?;
        let minutes = total_nanos.div_ceil(NANOS_PER_MINUTE);
        let minutes = u64::try_from(minutes)
            .map_err(|_| QueueError::invalid_argument("wait estimate overflows"))?;

        Ok(WaitEstimate { minutes })
    }
}

impl Default for WaitEstimator {
    fn default() -> Self {
        Self {
            avg_service: Duration::from_secs(DEFAULT_AVG_SERVICE_SECONDS),
        }
    }
}

/// Estimate the wait for `position` given an average service time in seconds
/// and render it for display.
///
/// Pass [`DEFAULT_AVG_SERVICE_SECONDS`] when no better figure is known.
pub fn estimate_wait(position: i64, avg_seconds: f64) -> Result<String> {
    let estimator = WaitEstimator::from_secs_f64(avg_seconds)?;
    Ok(estimator.estimate(position)?.to_string())
}
