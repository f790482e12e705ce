//! Budget handlers

use axum::{extract::State, Json};
use ledger_core::BudgetId;
use ledger_service::dto::{BudgetResponse, CreateBudgetRequest, ReorderRequest, UpdateBudgetRequest};
use ledger_service::BudgetService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /budgets
pub async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = BudgetService::new(state.service_context())
        .list(auth.user_id)
        .await?;
    Ok(Json(budgets.iter().map(BudgetResponse::from).collect()))
}

/// POST /budgets
pub async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBudgetRequest>,
) -> ApiResult<Created<Json<BudgetResponse>>> {
    let budget = BudgetService::new(state.service_context())
        .create(auth.user_id, request)
        .await?;
    Ok(Created(Json(BudgetResponse::from(budget))))
}

/// PATCH /budgets/{budget_id}
pub async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(budget_id): IdPath<BudgetId>,
    ValidatedJson(request): ValidatedJson<UpdateBudgetRequest>,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = BudgetService::new(state.service_context())
        .update(auth.user_id, budget_id, request)
        .await?;
    Ok(Json(BudgetResponse::from(budget)))
}

/// DELETE /budgets/{budget_id}
pub async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(budget_id): IdPath<BudgetId>,
) -> ApiResult<NoContent> {
    BudgetService::new(state.service_context())
        .delete(auth.user_id, budget_id)
        .await?;
    Ok(NoContent)
}

/// PUT /budgets/order
pub async fn reorder_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReorderRequest<BudgetId>>,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = BudgetService::new(state.service_context())
        .reorder(auth.user_id, &request.order)
        .await?;
    Ok(Json(budgets.iter().map(BudgetResponse::from).collect()))
}
