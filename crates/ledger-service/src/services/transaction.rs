//! Transaction service
//!
//! Creating or deleting a transaction moves the account balance, so both
//! invalidate the accounts entry and the dashboard summary.

use chrono::Utc;
use ledger_core::{AccountId, DomainError, Transaction, TransactionId, UserId};
use tracing::{info, instrument};

use crate::dto::CreateTransactionRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Default number of transactions returned by a listing
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on a listing
pub const MAX_LIMIT: i64 = 200;

/// Transaction service
pub struct TransactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest transactions of one account
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: UserId,
        account_id: AccountId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<Transaction>> {
        if self.ctx.account_repo().find(user_id, account_id).await?.is_none() {
            return Err(DomainError::AccountNotFound(account_id).into());
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(self
            .ctx
            .transaction_repo()
            .find_by_account(user_id, account_id, limit)
            .await?)
    }

    /// Record a transaction and apply it to the account balance
    #[instrument(skip(self, request), fields(account_id = %request.account_id))]
    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateTransactionRequest,
    ) -> ServiceResult<Transaction> {
        let occurred_on = request
            .occurred_on
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut transaction = Transaction::new(
            user_id,
            request.account_id,
            request.description.trim().to_string(),
            request.amount_cents,
            occurred_on,
        );
        if let Some(category) = request.category {
            transaction = transaction.with_category(category.trim());
        }

        self.ctx.transaction_repo().create(&transaction).await?;
        self.invalidate(user_id).await?;

        info!(transaction_id = %transaction.id, "Transaction recorded");
        Ok(transaction)
    }

    /// Delete a transaction and reverse its effect on the balance
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, transaction_id: TransactionId) -> ServiceResult<()> {
        self.ctx
            .transaction_repo()
            .delete(user_id, transaction_id)
            .await?;
        self.invalidate(user_id).await?;
        Ok(())
    }

    async fn invalidate(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.accounts_cache().invalidate(user_id).await?;
        self.ctx.dashboard_cache().invalidate(user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateAccountRequest;
    use crate::services::AccountService;
    use crate::testing::test_context;
    use ledger_core::AccountKind;

    fn spend(account_id: AccountId, amount_cents: i64) -> CreateTransactionRequest {
        CreateTransactionRequest {
            account_id,
            description: "Coffee".to_string(),
            category: Some("Food".to_string()),
            amount_cents,
            occurred_on: None,
        }
    }

    #[tokio::test]
    async fn test_balance_follows_transactions() {
        let t = test_context();
        let accounts = AccountService::new(&t.ctx);
        let service = TransactionService::new(&t.ctx);
        let user = UserId::new();

        let account = accounts
            .create(
                user,
                CreateAccountRequest {
                    name: "Main".to_string(),
                    kind: AccountKind::Checking,
                    balance_cents: 10_000,
                },
            )
            .await
            .unwrap();
        // Warm the cache so a missing invalidation would show up
        accounts.list(user).await.unwrap();

        let coffee = service.create(user, spend(account.id, -450)).await.unwrap();
        assert_eq!(coffee.occurred_on, Utc::now().date_naive());
        assert_eq!(accounts.list(user).await.unwrap()[0].balance_cents, 9_550);

        let listed = service.list(user, account.id, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category.as_deref(), Some("Food"));

        service.delete(user, coffee.id).await.unwrap();
        assert_eq!(accounts.list(user).await.unwrap()[0].balance_cents, 10_000);
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let t = test_context();
        let service = TransactionService::new(&t.ctx);
        let user = UserId::new();

        let err = service.create(user, spend(AccountId::new(), -1)).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ACCOUNT");

        let err = service.list(user, AccountId::new(), Some(10)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service.delete(user, TransactionId::new()).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_TRANSACTION");
    }
}
