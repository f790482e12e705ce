//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Every per-user lookup and mutation takes the owning `UserId`: a row that
//! exists but belongs to somebody else is reported exactly like a missing row.

use std::collections::HashSet;
use std::hash::Hash;

use async_trait::async_trait;

use crate::entities::{Account, AccountChanges, Budget, EconomyRecord, Transaction, User};
use crate::error::DomainError;
use crate::value_objects::{AccountId, BudgetId, TransactionId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Check that `order` lists every id in `existing` exactly once
pub fn validate_order<T: Eq + Hash>(order: &[T], existing: &[T]) -> RepoResult<()> {
    let wanted: HashSet<&T> = order.iter().collect();
    let have: HashSet<&T> = existing.iter().collect();

    if wanted.len() != order.len() || order.len() != existing.len() || wanted != have {
        return Err(DomainError::InvalidOrder);
    }
    Ok(())
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// List a user's accounts ordered by position
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Account>>;

    /// Find one account owned by the user
    async fn find(&self, user_id: UserId, id: AccountId) -> RepoResult<Option<Account>>;

    /// Create a new account, appended after the user's existing accounts
    async fn create(&self, account: &Account) -> RepoResult<Account>;

    /// Write only the columns `changes` carries and return the stored row.
    ///
    /// Single statement: a balance moved by a concurrent transaction is kept
    /// unless `changes` sets the balance itself. `AccountNotFound` if not owned.
    async fn update(
        &self,
        user_id: UserId,
        id: AccountId,
        changes: &AccountChanges,
    ) -> RepoResult<Account>;

    /// Delete an account and its transactions; `AccountNotFound` if not owned
    async fn delete(&self, user_id: UserId, id: AccountId) -> RepoResult<()>;

    /// Rewrite positions so that `order[i]` gets position `i`.
    ///
    /// `order` must contain each of the user's accounts exactly once,
    /// otherwise nothing is written and `InvalidOrder` is returned.
    async fn reorder(&self, user_id: UserId, order: &[AccountId]) -> RepoResult<()>;
}

// ============================================================================
// Budget Repository
// ============================================================================

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// List a user's budgets ordered by position
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Budget>>;

    /// Find one budget owned by the user
    async fn find(&self, user_id: UserId, id: BudgetId) -> RepoResult<Option<Budget>>;

    /// Create a new budget; `BudgetCategoryExists` on a duplicate category
    async fn create(&self, budget: &Budget) -> RepoResult<Budget>;

    /// Update category, limit, spent, and period; `BudgetNotFound` if not owned
    async fn update(&self, budget: &Budget) -> RepoResult<()>;

    /// Delete a budget; `BudgetNotFound` if not owned
    async fn delete(&self, user_id: UserId, id: BudgetId) -> RepoResult<()>;

    /// Same contract as [`AccountRepository::reorder`]
    async fn reorder(&self, user_id: UserId, order: &[BudgetId]) -> RepoResult<()>;
}

// ============================================================================
// Transaction Repository
// ============================================================================

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// List transactions of one account, newest first
    async fn find_by_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
        limit: i64,
    ) -> RepoResult<Vec<Transaction>>;

    /// Insert a transaction and apply its amount to the account balance atomically.
    ///
    /// Returns `AccountNotFound` if the account is not owned by the user.
    async fn create(&self, transaction: &Transaction) -> RepoResult<()>;

    /// Delete a transaction and reverse its amount on the account atomically
    async fn delete(&self, user_id: UserId, id: TransactionId) -> RepoResult<Transaction>;
}

// ============================================================================
// Economy Repository
// ============================================================================

#[async_trait]
pub trait EconomyRepository: Send + Sync {
    /// Latest stored snapshot for a data source
    async fn latest(&self, source: &str) -> RepoResult<Option<EconomyRecord>>;

    /// Replace the snapshot for a data source (delete old, insert new, one transaction)
    async fn replace(&self, source: &str, data: &serde_json::Value) -> RepoResult<EconomyRecord>;
}
