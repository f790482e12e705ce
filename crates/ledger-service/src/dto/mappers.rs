//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use ledger_core::{Account, Budget, Transaction, User};

use super::responses::{AccountResponse, BudgetResponse, TransactionResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            kind: account.kind.as_str().to_string(),
            balance_cents: account.balance_cents,
            position: account.position,
            updated_at: account.updated_at,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

impl From<&Budget> for BudgetResponse {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id.to_string(),
            category: budget.category.clone(),
            limit_cents: budget.limit_cents,
            spent_cents: budget.spent_cents,
            remaining_cents: budget.remaining_cents(),
            period: budget.period.as_str().to_string(),
            position: budget.position,
        }
    }
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self::from(&budget)
    }
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            account_id: transaction.account_id.to_string(),
            description: transaction.description,
            category: transaction.category,
            amount_cents: transaction.amount_cents,
            occurred_on: transaction.occurred_on,
            created_at: transaction.created_at,
        }
    }
}
