//! Read-through collection cache.
//!
//! One entry per (collection, owner) under the key `"{collection}:{user_id}"`.
//! Reads populate the entry on miss; mutations delete it. A missing entry is
//! never cached as "empty": only a loader result is ever stored.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use ledger_core::UserId;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::backend::{CacheBackend, CacheError, CacheResult};

/// A cached per-user collection: key prefix and entry lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub name: &'static str,
    pub ttl: Duration,
}

impl Collection {
    pub const ACCOUNTS: Self = Self::new("accounts", Duration::from_secs(25 * 60));
    pub const BUDGETS: Self = Self::new("budgets", Duration::from_secs(25 * 60));
    pub const DASHBOARD: Self = Self::new("dashboard", Duration::from_secs(25 * 60));

    #[must_use]
    pub const fn new(name: &'static str, ttl: Duration) -> Self {
        Self { name, ttl }
    }

    /// Cache key for one owner
    #[must_use]
    pub fn key(&self, owner: UserId) -> String {
        format!("{}:{}", self.name, owner)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Typed read-through view of one collection
pub struct ReadThrough<T> {
    cache: Arc<dyn CacheBackend>,
    collection: Collection,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ReadThrough<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            collection: self.collection,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ReadThrough<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadThrough")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl<T> ReadThrough<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(cache: Arc<dyn CacheBackend>, collection: Collection) -> Self {
        Self {
            cache,
            collection,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Return the cached snapshot, or load it and write it through.
    ///
    /// Cache failures propagate; an undecodable entry is logged and reloaded.
    pub async fn fetch<F, Fut, E>(&self, owner: UserId, loader: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        E: From<CacheError>,
    {
        let key = self.collection.key(owner);

        if let Some(raw) = self.cache.get_raw(&key).await? {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key = %key, error = %e, "Discarding undecodable cache entry"),
            }
        }

        debug!(key = %key, "Cache miss");
        let value = loader().await?;
        let serialized = serde_json::to_string(&value).map_err(CacheError::from)?;
        self.cache
            .set_raw(&key, &serialized, self.collection.ttl)
            .await?;
        Ok(value)
    }

    /// Drop the owner's snapshot so the next read reloads it
    pub async fn invalidate(&self, owner: UserId) -> CacheResult<()> {
        let key = self.collection.key(owner);
        let removed = self.cache.delete(&key).await?;
        debug!(key = %key, removed, "Cache invalidated");
        Ok(())
    }
}
