//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use ledger_core::traits::validate_order;
use ledger_core::{
    Account, AccountChanges, AccountId, AccountKind, AccountRepository, DomainError, RepoResult, UserId,
};

use crate::models::AccountModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, user_id, name, kind, balance_cents, position, created_at, updated_at
            FROM accounts
            WHERE user_id = $1
            ORDER BY position ASC, created_at ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId, id: AccountId) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, user_id, name, kind, balance_cents, position, created_at, updated_at
            FROM accounts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Account::from))
    }

    #[instrument(skip(self, account), fields(account_id = %account.id))]
    async fn create(&self, account: &Account) -> RepoResult<Account> {
        let row = sqlx::query_as::<_, AccountModel>(
            r"
            INSERT INTO accounts (id, user_id, name, kind, balance_cents, position, created_at, updated_at)
            VALUES (
                $1, $2, $3, $4, $5,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM accounts WHERE user_id = $2),
                $6, $7
            )
            RETURNING id, user_id, name, kind, balance_cents, position, created_at, updated_at
            ",
        )
        .bind(account.id.into_inner())
        .bind(account.user_id.into_inner())
        .bind(&account.name)
        .bind(account.kind.as_str())
        .bind(account.balance_cents)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Account::from(row))
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        user_id: UserId,
        id: AccountId,
        changes: &AccountChanges,
    ) -> RepoResult<Account> {
        // NULL keeps the column, so no read-modify-write window against balance adjustments
        let row = sqlx::query_as::<_, AccountModel>(
            r"
            UPDATE accounts
            SET name = COALESCE($3, name),
                kind = COALESCE($4, kind),
                balance_cents = COALESCE($5, balance_cents),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, kind, balance_cents, position, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(changes.name.as_deref())
        .bind(changes.kind.map(AccountKind::as_str))
        .bind(changes.balance_cents)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Account::from).ok_or(DomainError::AccountNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId, id: AccountId) -> RepoResult<()> {
        // Transactions go with the account (ON DELETE CASCADE)
        let result = sqlx::query(
            r"
            DELETE FROM accounts WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self, order), fields(count = order.len()))]
    async fn reorder(&self, user_id: UserId, order: &[AccountId]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the user's rows so the permutation check and the writes see the same set
        let existing: Vec<AccountId> = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM accounts WHERE user_id = $1 FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(AccountId::from_uuid)
        .collect();

        validate_order(order, &existing)?;

        for (position, id) in order.iter().enumerate() {
            sqlx::query(
                r"
                UPDATE accounts
                SET position = $3, updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                ",
            )
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
