//! Transaction entity - a single debit or credit against an account

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AccountId, TransactionId, UserId};

/// Transaction entity
///
/// Positive amounts are deposits, negative amounts are withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub account_id: AccountId,
    pub description: String,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[must_use]
    pub fn new(
        user_id: UserId,
        account_id: AccountId,
        description: String,
        amount_cents: i64,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            account_id,
            description,
            category: None,
            amount_cents,
            occurred_on,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
