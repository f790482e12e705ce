//! PostgreSQL implementation of BudgetRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use ledger_core::traits::validate_order;
use ledger_core::{Budget, BudgetId, BudgetRepository, DomainError, RepoResult, UserId};

use crate::models::BudgetModel;

use super::error::{map_budget_error, map_db_error};

/// PostgreSQL implementation of BudgetRepository
#[derive(Clone)]
pub struct PgBudgetRepository {
    pool: PgPool,
}

impl PgBudgetRepository {
    /// Create a new PgBudgetRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetRepository for PgBudgetRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Budget>> {
        let rows = sqlx::query_as::<_, BudgetModel>(
            r"
            SELECT id, user_id, category, limit_cents, spent_cents, period, position,
                   created_at, updated_at
            FROM budgets
            WHERE user_id = $1
            ORDER BY position ASC, created_at ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Budget::from).collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId, id: BudgetId) -> RepoResult<Option<Budget>> {
        let result = sqlx::query_as::<_, BudgetModel>(
            r"
            SELECT id, user_id, category, limit_cents, spent_cents, period, position,
                   created_at, updated_at
            FROM budgets
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Budget::from))
    }

    #[instrument(skip(self, budget), fields(budget_id = %budget.id))]
    async fn create(&self, budget: &Budget) -> RepoResult<Budget> {
        let row = sqlx::query_as::<_, BudgetModel>(
            r"
            INSERT INTO budgets (id, user_id, category, limit_cents, spent_cents, period, position,
                                 created_at, updated_at)
            VALUES (
                $1, $2, $3, $4, $5, $6,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM budgets WHERE user_id = $2),
                $7, $8
            )
            RETURNING id, user_id, category, limit_cents, spent_cents, period, position,
                      created_at, updated_at
            ",
        )
        .bind(budget.id.into_inner())
        .bind(budget.user_id.into_inner())
        .bind(&budget.category)
        .bind(budget.limit_cents)
        .bind(budget.spent_cents)
        .bind(budget.period.as_str())
        .bind(budget.created_at)
        .bind(budget.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_budget_error(&budget.category))?;

        Ok(Budget::from(row))
    }

    #[instrument(skip(self, budget), fields(budget_id = %budget.id))]
    async fn update(&self, budget: &Budget) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE budgets
            SET category = $3, limit_cents = $4, spent_cents = $5, period = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(budget.id.into_inner())
        .bind(budget.user_id.into_inner())
        .bind(&budget.category)
        .bind(budget.limit_cents)
        .bind(budget.spent_cents)
        .bind(budget.period.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_budget_error(&budget.category))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BudgetNotFound(budget.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId, id: BudgetId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM budgets WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BudgetNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self, order), fields(count = order.len()))]
    async fn reorder(&self, user_id: UserId, order: &[BudgetId]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let existing: Vec<BudgetId> = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM budgets WHERE user_id = $1 FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(BudgetId::from_uuid)
        .collect();

        validate_order(order, &existing)?;

        for (position, id) in order.iter().enumerate() {
            sqlx::query(
                r"
                UPDATE budgets
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
