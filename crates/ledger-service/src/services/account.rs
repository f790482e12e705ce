//! Account service
//!
//! Reads go through the `accounts:{user}` read-through entry. Every committed
//! write drops that entry and the user's dashboard summary before returning.

use ledger_core::{Account, AccountChanges, AccountId, UserId};
use tracing::{info, instrument};

use crate::dto::{CreateAccountRequest, UpdateAccountRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the user's accounts in display order
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> ServiceResult<Vec<Account>> {
        let repo = self.ctx.account_repo();
        self.ctx
            .accounts_cache()
            .fetch(user_id, || async move {
                Ok::<_, ServiceError>(repo.find_by_user(user_id).await?)
            })
            .await
    }

    /// Create an account at the end of the list
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateAccountRequest,
    ) -> ServiceResult<Account> {
        let account = Account::new(
            user_id,
            request.name.trim().to_string(),
            request.kind,
            request.balance_cents,
        );
        let created = self.ctx.account_repo().create(&account).await?;
        self.invalidate(user_id).await?;

        info!(account_id = %created.id, "Account created");
        Ok(created)
    }

    /// Apply a partial update; fields absent from the request are not written
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        account_id: AccountId,
        request: UpdateAccountRequest,
    ) -> ServiceResult<Account> {
        let changes = AccountChanges {
            name: request.name.map(|name| name.trim().to_string()),
            kind: request.kind,
            balance_cents: request.balance_cents,
        };

        let account = self
            .ctx
            .account_repo()
            .update(user_id, account_id, &changes)
            .await?;
        self.invalidate(user_id).await?;
        Ok(account)
    }

    /// Delete an account together with its transactions
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, account_id: AccountId) -> ServiceResult<()> {
        self.ctx.account_repo().delete(user_id, account_id).await?;
        self.invalidate(user_id).await?;

        info!(account_id = %account_id, "Account deleted");
        Ok(())
    }

    /// Rewrite the display order; `order` must list every account once
    #[instrument(skip(self, order), fields(count = order.len()))]
    pub async fn reorder(
        &self,
        user_id: UserId,
        order: &[AccountId],
    ) -> ServiceResult<Vec<Account>> {
        self.ctx.account_repo().reorder(user_id, order).await?;
        self.invalidate(user_id).await?;
        self.list(user_id).await
    }

    async fn invalidate(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.accounts_cache().invalidate(user_id).await?;
        self.ctx.dashboard_cache().invalidate(user_id).await?;
        Ok(())
    }
}
