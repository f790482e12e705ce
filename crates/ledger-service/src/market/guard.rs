//! Single-flight refresh of the shared economy aggregate
//!
//! Lookup order: cache, then the durable record while it is younger than
//! 24 hours, then one upstream refresh at a time behind `refresh_lock`.
//! Waiters re-check cache and store once they get the lock, so a burst of
//! requests after expiry costs a single upstream batch. A failed batch serves
//! the bundled snapshot and caches it briefly so the next attempt comes soon.
//!
//! Cache and store trouble is logged and skipped: a lookup failure counts as a
//! miss, and a failed write still returns the aggregate in hand.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ledger_cache::CacheBackend;
use ledger_core::{EconomyRecord, EconomyRepository};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::source::{MarketError, MarketSource};
use crate::services::{ServiceError, ServiceResult};

/// Cache key of the aggregate
pub const ECONOMY_KEY: &str = "economy";

/// Durable record name of the aggregate
pub const ECONOMY_SOURCE: &str = "alphavantage";

/// Lifetime of a freshly fetched aggregate
pub const FRESH_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Lifetime of the bundled snapshot after a failed refresh
pub const FALLBACK_TTL: Duration = Duration::from_secs(5 * 60);

const FALLBACK_JSON: &str = include_str!("../../data/economy_fallback.json");

/// Where a snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    Cache,
    Store,
    Upstream,
    Fallback,
}

/// The aggregate and its origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomySnapshot {
    pub aggregate: Value,
    pub origin: SnapshotOrigin,
}

/// Guards the upstream refresh of the economy aggregate
pub struct EconomyGuard {
    cache: Arc<dyn CacheBackend>,
    store: Arc<dyn EconomyRepository>,
    source: Arc<dyn MarketSource>,
    fetch_timeout: Duration,
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for EconomyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EconomyGuard")
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

impl EconomyGuard {
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        store: Arc<dyn EconomyRepository>,
        source: Arc<dyn MarketSource>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            source,
            fetch_timeout,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return the aggregate, refreshing it from upstream when nothing fresh is stored.
    ///
    /// Only an unreadable bundled snapshot fails the call.
    #[instrument(skip(self))]
    pub async fn get_or_refresh(&self) -> ServiceResult<EconomySnapshot> {
        if let Some(snapshot) = self.lookup().await {
            return Ok(snapshot);
        }

        // Released on drop, on every return path below
        let _refresh = self.refresh_lock.lock().await;

        if let Some(snapshot) = self.lookup().await {
            return Ok(snapshot);
        }

        match self.fetch_aggregate().await {
            Ok(aggregate) => {
                let aggregate = match self.store.replace(ECONOMY_SOURCE, &aggregate).await {
                    Ok(record) => record.data,
                    Err(e) => {
                        warn!(error = %e, "Failed to persist economy aggregate");
                        aggregate
                    }
                };
                self.cache_put(&aggregate, FRESH_TTL).await;
                info!("Economy aggregate refreshed from upstream");
                Ok(EconomySnapshot {
                    aggregate,
                    origin: SnapshotOrigin::Upstream,
                })
            }
            Err(e) => {
                warn!(error = %e, "Upstream refresh failed, serving bundled snapshot");
                let aggregate = fallback_aggregate()?;
                self.cache_put(&aggregate, FALLBACK_TTL).await;
                Ok(EconomySnapshot {
                    aggregate,
                    origin: SnapshotOrigin::Fallback,
                })
            }
        }
    }

    /// Cache, then fresh durable record (written back to the cache)
    async fn lookup(&self) -> Option<EconomySnapshot> {
        match self.cache.get_raw(ECONOMY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(aggregate) => {
                    return Some(EconomySnapshot {
                        aggregate,
                        origin: SnapshotOrigin::Cache,
                    })
                }
                Err(e) => warn!(error = %e, "Discarding undecodable economy cache entry"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Economy cache read failed"),
        }

        let record = match self.store.latest(ECONOMY_SOURCE).await {
            Ok(record) => record?,
            Err(e) => {
                warn!(error = %e, "Economy store read failed");
                return None;
            }
        };
        let ttl = remaining_freshness(&record)?;

        self.cache_put(&record.data, ttl).await;
        Some(EconomySnapshot {
            aggregate: record.data,
            origin: SnapshotOrigin::Store,
        })
    }

    async fn cache_put(&self, aggregate: &Value, ttl: Duration) {
        if let Err(e) = self.cache.set_json(ECONOMY_KEY, aggregate, ttl).await {
            warn!(error = %e, "Failed to cache economy aggregate");
        }
    }

    /// All three upstream parts in parallel; the first failure aborts the batch
    async fn fetch_aggregate(&self) -> Result<Value, MarketError> {
        let (indicators, news, movers) = tokio::try_join!(
            bounded(self.fetch_timeout, "indicators", self.source.fetch_indicators()),
            bounded(self.fetch_timeout, "news", self.source.fetch_news()),
            bounded(self.fetch_timeout, "movers", self.source.fetch_movers()),
        )?;

        Ok(json!({
            "indicators": indicators,
            "news": news,
            "movers": movers,
            "fetched_at": Utc::now(),
        }))
    }
}

async fn bounded<F>(limit: Duration, part: &'static str, fetch: F) -> Result<Value, MarketError>
where
    F: Future<Output = Result<Value, MarketError>>,
{
    tokio::time::timeout(limit, fetch)
        .await
        .map_err(|_| MarketError::Timeout(part))?
}

/// Time left before the record goes stale; the cache entry must not outlive it
fn remaining_freshness(record: &EconomyRecord) -> Option<Duration> {
    if !record.is_fresh() {
        return None;
    }
    let expires = record.time + chrono::Duration::hours(EconomyRecord::MAX_AGE_HOURS);
    (expires - Utc::now()).to_std().ok().filter(|d| !d.is_zero())
}

fn fallback_aggregate() -> ServiceResult<Value> {
    serde_json::from_str(FALLBACK_JSON)
        .map_err(|e| ServiceError::internal(format!("bundled economy snapshot is invalid: {e}")))
}
