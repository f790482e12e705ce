//! PostgreSQL implementation of TransactionRepository
//!
//! Every write touches two tables: the transaction row and the account
//! balance. Both statements run inside one database transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ledger_core::{
    AccountId, DomainError, RepoResult, Transaction, TransactionId, TransactionRepository, UserId,
};

use crate::models::TransactionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of TransactionRepository
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    /// Create a new PgTransactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    #[instrument(skip(self))]
    async fn find_by_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
        limit: i64,
    ) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionModel>(
            r"
            SELECT id, user_id, account_id, description, category, amount_cents, occurred_on, created_at
            FROM transactions
            WHERE account_id = $1 AND user_id = $2
            ORDER BY occurred_on DESC, created_at DESC
            LIMIT $3
            ",
        )
        .bind(account_id.into_inner())
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    #[instrument(skip(self, transaction), fields(transaction_id = %transaction.id))]
    async fn create(&self, transaction: &Transaction) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let updated = sqlx::query(
            r"
            UPDATE accounts
            SET balance_cents = balance_cents + $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(transaction.account_id.into_inner())
        .bind(transaction.user_id.into_inner())
        .bind(transaction.amount_cents)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(transaction.account_id));
        }

        sqlx::query(
            r"
            INSERT INTO transactions (id, user_id, account_id, description, category, amount_cents,
                                      occurred_on, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(transaction.user_id.into_inner())
        .bind(transaction.account_id.into_inner())
        .bind(&transaction.description)
        .bind(&transaction.category)
        .bind(transaction.amount_cents)
        .bind(transaction.occurred_on)
        .bind(transaction.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId, id: TransactionId) -> RepoResult<Transaction> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query_as::<_, TransactionModel>(
            r"
            DELETE FROM transactions
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, account_id, description, category, amount_cents, occurred_on, created_at
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::TransactionNotFound(id))?;

        sqlx::query(
            r"
            UPDATE accounts
            SET balance_cents = balance_cents - $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(removed.account_id)
        .bind(removed.amount_cents)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Transaction::from(removed))
    }
}
