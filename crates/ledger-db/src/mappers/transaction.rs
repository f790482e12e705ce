//! Transaction model -> entity mapper

use ledger_core::{AccountId, Transaction, TransactionId, UserId};

use crate::models::TransactionModel;

impl From<TransactionModel> for Transaction {
    fn from(model: TransactionModel) -> Self {
        Transaction {
            id: TransactionId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            account_id: AccountId::from_uuid(model.account_id),
            description: model.description,
            category: model.category,
            amount_cents: model.amount_cents,
            occurred_on: model.occurred_on,
            created_at: model.created_at,
        }
    }
}
