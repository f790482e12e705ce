//! Transaction handlers

use axum::{extract::State, Json};
use ledger_core::{AccountId, TransactionId};
use ledger_service::dto::{CreateTransactionRequest, TransactionResponse};
use ledger_service::TransactionService;

use crate::extractors::{AuthUser, IdPath, Limit, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /accounts/{account_id}/transactions?limit=
pub async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(account_id): IdPath<AccountId>,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let transactions = TransactionService::new(state.service_context())
        .list(auth.user_id, account_id, limit)
        .await?;
    Ok(Json(transactions.into_iter().map(TransactionResponse::from).collect()))
}

/// POST /transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<Created<Json<TransactionResponse>>> {
    let transaction = TransactionService::new(state.service_context())
        .create(auth.user_id, request)
        .await?;
    Ok(Created(Json(TransactionResponse::from(transaction))))
}

/// DELETE /transactions/{transaction_id}
pub async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(transaction_id): IdPath<TransactionId>,
) -> ApiResult<NoContent> {
    TransactionService::new(state.service_context())
        .delete(auth.user_id, transaction_id)
        .await?;
    Ok(NoContent)
}
