//! Cache backend abstraction.
//!
//! Values are stored as JSON strings with a mandatory TTL. Every operation is
//! an async suspension point; atomicity of a single `set`/`delete` is left to
//! the backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Error type for cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store with per-entry expiry
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get the raw value stored under `key`
    async fn get_raw(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Remove `key`; returns whether anything was removed
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Check the backend is reachable
    async fn ping(&self) -> CacheResult<()>;
}

impl dyn CacheBackend {
    /// Serialize and store a JSON value
    pub async fn set_json<V: Serialize + Sync>(
        &self,
        key: &str,
        value: &V,
        ttl: Duration,
    ) -> CacheResult<()> {
        let serialized = serde_json::to_string(value)?;
        self.set_raw(key, &serialized, ttl).await
    }
}
