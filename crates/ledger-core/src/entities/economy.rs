//! External market data record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Durable snapshot of third-party economic data
///
/// There is at most one record per source; a refresh replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyRecord {
    pub time: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl EconomyRecord {
    /// Records older than 24 hours must be refetched
    pub const MAX_AGE_HOURS: i64 = 24;

    #[must_use]
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            time: Utc::now(),
            data,
        }
    }

    /// Whether the record is still usable at `now`
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now - self.time < Duration::hours(Self::MAX_AGE_HOURS)
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}
