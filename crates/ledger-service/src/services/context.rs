//! Service context - dependency container for services
//!
//! Constructed once at startup and shared by every request. Holds the
//! repositories, the cache backend with its per-collection read-through
//! views, and the economy guard.

use std::sync::Arc;
use std::time::Duration;

use ledger_cache::{CacheBackend, Collection, ReadThrough};
use ledger_core::{
    Account, AccountRepository, Budget, BudgetRepository, EconomyRepository,
    TransactionRepository, UserRepository,
};
use ledger_db::PgPool;

use super::dashboard::DashboardSummary;
use super::error::{ServiceError, ServiceResult};
use crate::market::{EconomyGuard, MarketSource};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    cache: Arc<dyn CacheBackend>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    account_repo: Arc<dyn AccountRepository>,
    budget_repo: Arc<dyn BudgetRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,

    // Per-user read-through views
    accounts_cache: ReadThrough<Vec<Account>>,
    budgets_cache: ReadThrough<Vec<Budget>>,
    dashboard_cache: ReadThrough<DashboardSummary>,

    economy: Arc<EconomyGuard>,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the cache backend
    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    pub fn budget_repo(&self) -> &dyn BudgetRepository {
        self.budget_repo.as_ref()
    }

    pub fn transaction_repo(&self) -> &dyn TransactionRepository {
        self.transaction_repo.as_ref()
    }

    // === Read-through views ===

    pub fn accounts_cache(&self) -> &ReadThrough<Vec<Account>> {
        &self.accounts_cache
    }

    pub fn budgets_cache(&self) -> &ReadThrough<Vec<Budget>> {
        &self.budgets_cache
    }

    pub fn dashboard_cache(&self) -> &ReadThrough<DashboardSummary> {
        &self.dashboard_cache
    }

    /// Get the economy aggregate guard
    pub fn economy(&self) -> &EconomyGuard {
        self.economy.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("cache", &"dyn CacheBackend")
            .field("repositories", &"...")
            .field("economy", &self.economy)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    cache: Option<Arc<dyn CacheBackend>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    budget_repo: Option<Arc<dyn BudgetRepository>>,
    transaction_repo: Option<Arc<dyn TransactionRepository>>,
    economy_repo: Option<Arc<dyn EconomyRepository>>,
    market_source: Option<Arc<dyn MarketSource>>,
    fetch_timeout: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn budget_repo(mut self, repo: Arc<dyn BudgetRepository>) -> Self {
        self.budget_repo = Some(repo);
        self
    }

    pub fn transaction_repo(mut self, repo: Arc<dyn TransactionRepository>) -> Self {
        self.transaction_repo = Some(repo);
        self
    }

    pub fn economy_repo(mut self, repo: Arc<dyn EconomyRepository>) -> Self {
        self.economy_repo = Some(repo);
        self
    }

    pub fn market_source(mut self, source: Arc<dyn MarketSource>) -> Self {
        self.market_source = Some(source);
        self
    }

    /// Per-request bound on upstream market calls (default 8 seconds)
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        let cache = required(self.cache, "cache")?;
        let economy = EconomyGuard::new(
            Arc::clone(&cache),
            required(self.economy_repo, "economy_repo")?,
            required(self.market_source, "market_source")?,
            self.fetch_timeout.unwrap_or(Duration::from_secs(8)),
        );

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            user_repo: required(self.user_repo, "user_repo")?,
            account_repo: required(self.account_repo, "account_repo")?,
            budget_repo: required(self.budget_repo, "budget_repo")?,
            transaction_repo: required(self.transaction_repo, "transaction_repo")?,
            accounts_cache: ReadThrough::new(Arc::clone(&cache), Collection::ACCOUNTS),
            budgets_cache: ReadThrough::new(Arc::clone(&cache), Collection::BUDGETS),
            dashboard_cache: ReadThrough::new(Arc::clone(&cache), Collection::DASHBOARD),
            cache,
            economy: Arc::new(economy),
        })
    }
}
