//! # ledger-cache
//!
//! Caching layer for per-user collection snapshots and the shared market aggregate.
//!
//! ## Features
//!
//! - **Backends**: [`CacheBackend`] over Redis (deadpool) or an in-process map
//! - **Read-through**: [`ReadThrough`] loads on miss, writes through with a
//!   per-collection TTL, and is invalidated after every committed mutation
//!
//! ## Example
//!
//! ```ignore
//! use ledger_cache::{Collection, MemoryCache, ReadThrough};
//!
//! let cache: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new());
//! let accounts = ReadThrough::<Vec<Account>>::new(cache, Collection::ACCOUNTS);
//!
//! let list = accounts.fetch(user_id, || repo.find_by_user(user_id)).await?;
//! accounts.invalidate(user_id).await?;
//! ```

pub mod backend;
pub mod memory;
pub mod pool;
pub mod read_through;

pub use backend::{CacheBackend, CacheError, CacheResult};
pub use memory::MemoryCache;
pub use pool::{RedisPool, RedisPoolConfig};
pub use read_through::{Collection, ReadThrough};
