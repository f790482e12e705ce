//! Authentication handlers
//!
//! Registration, login, status, refresh, and logout. Successful credential
//! checks end in a fresh cookie pair; nothing is stored server-side.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use ledger_common::{AppError, TokenError};
use ledger_core::UserId;
use ledger_service::dto::{AuthStatusResponse, LoginRequest, RegisterRequest, UserResponse};
use ledger_service::{AuthService, ServiceError};
use tracing::{error, info};

use crate::extractors::ValidatedJson;
use crate::response::{ApiError, ApiResult, NoContent};
use crate::session::RefreshSession;
use crate::state::AppState;

fn issue(
    state: &AppState,
    jar: CookieJar,
    user_id: UserId,
    remaining_secs: Option<i64>,
) -> ApiResult<CookieJar> {
    state
        .sessions()
        .issue(jar, user_id, remaining_secs)
        .map_err(|e| ApiError::from(AppError::from(e)))
}

/// Register and sign in
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let user = AuthService::new(state.service_context())
        .register(request)
        .await?;
    let jar = issue(&state, jar, user.id, None)?;
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(user))))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<UserResponse>)> {
    let user = AuthService::new(state.service_context())
        .login(request)
        .await?;
    let jar = issue(&state, jar, user.id, None)?;
    Ok((jar, Json(UserResponse::from(user))))
}

/// Report whether the access cookie is usable
///
/// GET /auth/status
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<AuthStatusResponse>) {
    let sessions = state.sessions();
    let Some(token) = sessions.access_token(&jar) else {
        return (jar, Json(AuthStatusResponse::anonymous()));
    };

    match sessions.verify_access(token) {
        Ok(_) => (jar, Json(AuthStatusResponse::authenticated())),
        Err(TokenError::Expired) => (jar, Json(AuthStatusResponse::refreshable())),
        Err(TokenError::Malformed | TokenError::BadSignature) => {
            (sessions.clear(jar), Json(AuthStatusResponse::anonymous()))
        }
        Err(TokenError::Unexpected(reason)) => {
            error!(%reason, "Access token verification failed");
            (jar, Json(AuthStatusResponse::anonymous()))
        }
    }
}

/// Rotate the cookie pair
///
/// POST /auth/refresh
///
/// The new refresh token expires when the presented one would have.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    session: RefreshSession,
) -> impl IntoResponse {
    let user = match AuthService::new(state.service_context())
        .ensure_active(session.user_id)
        .await
    {
        Ok(user) => user,
        // The token outlived its user
        Err(e @ ServiceError::App(AppError::InvalidToken)) => {
            return (state.sessions().clear(jar), ApiError::from(e)).into_response();
        }
        Err(e) => return ApiError::from(e).into_response(),
    };

    match issue(&state, jar, user.id, Some(session.remaining_secs())) {
        Ok(jar) => {
            info!(user_id = %user.id, "Session refreshed");
            (jar, Json(AuthStatusResponse::authenticated())).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Clear the session cookies
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    (state.sessions().clear(jar), NoContent)
}
