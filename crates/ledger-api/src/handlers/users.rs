//! User handlers

use axum::{extract::State, Json};
use ledger_service::dto::UserResponse;
use ledger_service::AuthService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = AuthService::new(state.service_context())
        .current_user(auth.user_id)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
