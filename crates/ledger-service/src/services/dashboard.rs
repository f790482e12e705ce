//! Dashboard service
//!
//! Combines the per-user summary (cached under `dashboard:{user}`) with the
//! shared economy aggregate served by the [`EconomyGuard`](crate::market::EconomyGuard).

use ledger_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::dto::DashboardResponse;

use super::account::AccountService;
use super::budget::BudgetService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Per-user totals shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Assets minus liabilities
    pub net_worth_cents: i64,
    pub account_count: usize,
    pub budgeted_cents: i64,
    pub spent_cents: i64,
}

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Summary plus economy aggregate
    #[instrument(skip(self))]
    pub async fn overview(&self, user_id: UserId) -> ServiceResult<DashboardResponse> {
        let summary = self.summary(user_id).await?;
        let economy = self.ctx.economy().get_or_refresh().await?;

        Ok(DashboardResponse {
            summary,
            economy: economy.aggregate,
            economy_source: economy.origin,
        })
    }

    /// Per-user totals, read through the dashboard entry
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: UserId) -> ServiceResult<DashboardSummary> {
        let ctx = self.ctx;
        ctx.dashboard_cache()
            .fetch(user_id, || async move {
                let accounts = AccountService::new(ctx).list(user_id).await?;
                let budgets = BudgetService::new(ctx).list(user_id).await?;

                Ok::<_, ServiceError>(DashboardSummary {
                    net_worth_cents: accounts.iter().map(ledger_core::Account::net_worth_cents).sum(),
                    account_count: accounts.len(),
                    budgeted_cents: budgets.iter().map(|b| b.limit_cents).sum(),
                    spent_cents: budgets.iter().map(|b| b.spent_cents).sum(),
                })
            })
            .await
    }
}
