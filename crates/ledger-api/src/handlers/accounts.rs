//! Account handlers

use axum::{extract::State, Json};
use ledger_core::AccountId;
use ledger_service::dto::{
    AccountResponse, CreateAccountRequest, ReorderRequest, UpdateAccountRequest,
};
use ledger_service::AccountService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn to_responses(accounts: &[ledger_core::Account]) -> Vec<AccountResponse> {
    accounts.iter().map(AccountResponse::from).collect()
}

/// GET /accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountService::new(state.service_context())
        .list(auth.user_id)
        .await?;
    Ok(Json(to_responses(&accounts)))
}

/// POST /accounts
pub async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateAccountRequest>,
) -> ApiResult<Created<Json<AccountResponse>>> {
    let account = AccountService::new(state.service_context())
        .create(auth.user_id, request)
        .await?;
    Ok(Created(Json(AccountResponse::from(account))))
}

/// PATCH /accounts/{account_id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(account_id): IdPath<AccountId>,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::new(state.service_context())
        .update(auth.user_id, account_id, request)
        .await?;
    Ok(Json(AccountResponse::from(account)))
}

/// DELETE /accounts/{account_id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(account_id): IdPath<AccountId>,
) -> ApiResult<NoContent> {
    AccountService::new(state.service_context())
        .delete(auth.user_id, account_id)
        .await?;
    Ok(NoContent)
}

/// PUT /accounts/order
pub async fn reorder_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReorderRequest<AccountId>>,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountService::new(state.service_context())
        .reorder(auth.user_id, &request.order)
        .await?;
    Ok(Json(to_responses(&accounts)))
}
