//! Budget entity - a spending limit for a category over a period

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{BudgetId, UserId};

/// Budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl From<&str> for BudgetPeriod {
    fn from(value: &str) -> Self {
        match value {
            "weekly" => Self::Weekly,
            "yearly" => Self::Yearly,
            _ => Self::Monthly,
        }
    }
}

/// Budget entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    pub category: String,
    pub limit_cents: i64,
    pub spent_cents: i64,
    pub period: BudgetPeriod,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with nothing spent
    #[must_use]
    pub fn new(user_id: UserId, category: String, limit_cents: i64, period: BudgetPeriod) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category,
            limit_cents,
            spent_cents: 0,
            period,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount left before the limit is reached (negative when over budget)
    #[must_use]
    pub fn remaining_cents(&self) -> i64 {
        self.limit_cents - self.spent_cents
    }
}
