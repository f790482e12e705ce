//! Budget database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for budgets table
#[derive(Debug, Clone, FromRow)]
pub struct BudgetModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub limit_cents: i64,
    pub spent_cents: i64,
    pub period: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
