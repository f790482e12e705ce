//! Transaction database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for transactions table
#[derive(Debug, Clone, FromRow)]
pub struct TransactionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub description: String,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}
