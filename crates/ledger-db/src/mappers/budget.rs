//! Budget model -> entity mapper

use ledger_core::{Budget, BudgetId, BudgetPeriod, UserId};

use crate::models::BudgetModel;

impl From<BudgetModel> for Budget {
    fn from(model: BudgetModel) -> Self {
        Budget {
            id: BudgetId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            category: model.category,
            limit_cents: model.limit_cents,
            spent_cents: model.spent_cents,
            period: BudgetPeriod::from(model.period.as_str()),
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
