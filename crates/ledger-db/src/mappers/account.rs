//! Account model -> entity mapper

use ledger_core::{Account, AccountId, AccountKind, UserId};

use crate::models::AccountModel;

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: AccountId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            name: model.name,
            kind: AccountKind::from(model.kind.as_str()),
            balance_cents: model.balance_cents,
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
