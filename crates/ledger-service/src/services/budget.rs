//! Budget service
//!
//! Same read-through and invalidation discipline as accounts, on the
//! `budgets:{user}` entry.

use chrono::Utc;
use ledger_core::{Budget, BudgetId, DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::{CreateBudgetRequest, UpdateBudgetRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Budget service
pub struct BudgetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BudgetService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> ServiceResult<Vec<Budget>> {
        let repo = self.ctx.budget_repo();
        self.ctx
            .budgets_cache()
            .fetch(user_id, || async move {
                Ok::<_, ServiceError>(repo.find_by_user(user_id).await?)
            })
            .await
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateBudgetRequest,
    ) -> ServiceResult<Budget> {
        let budget = Budget::new(
            user_id,
            request.category.trim().to_string(),
            request.limit_cents,
            request.period,
        );
        let created = self.ctx.budget_repo().create(&budget).await?;
        self.invalidate(user_id).await?;

        info!(budget_id = %created.id, "Budget created");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
        request: UpdateBudgetRequest,
    ) -> ServiceResult<Budget> {
        let mut budget = self
            .ctx
            .budget_repo()
            .find(user_id, budget_id)
            .await?
            .ok_or(DomainError::BudgetNotFound(budget_id))?;

        if let Some(category) = request.category {
            budget.category = category.trim().to_string();
        }
        if let Some(limit) = request.limit_cents {
            budget.limit_cents = limit;
        }
        if let Some(spent) = request.spent_cents {
            budget.spent_cents = spent;
        }
        if let Some(period) = request.period {
            budget.period = period;
        }
        budget.updated_at = Utc::now();

        self.ctx.budget_repo().update(&budget).await?;
        self.invalidate(user_id).await?;
        Ok(budget)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, budget_id: BudgetId) -> ServiceResult<()> {
        self.ctx.budget_repo().delete(user_id, budget_id).await?;
        self.invalidate(user_id).await?;

        info!(budget_id = %budget_id, "Budget deleted");
        Ok(())
    }

    #[instrument(skip(self, order), fields(count = order.len()))]
    pub async fn reorder(&self, user_id: UserId, order: &[BudgetId]) -> ServiceResult<Vec<Budget>> {
        self.ctx.budget_repo().reorder(user_id, order).await?;
        self.invalidate(user_id).await?;
        self.list(user_id).await
    }

    async fn invalidate(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.budgets_cache().invalidate(user_id).await?;
        self.ctx.dashboard_cache().invalidate(user_id).await?;
        Ok(())
    }
}
