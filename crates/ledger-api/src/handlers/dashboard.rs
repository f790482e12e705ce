//! Dashboard handler

use axum::{extract::State, Json};
use ledger_service::dto::DashboardResponse;
use ledger_service::DashboardService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let dashboard = DashboardService::new(state.service_context())
        .overview(auth.user_id)
        .await?;
    Ok(Json(dashboard))
}
