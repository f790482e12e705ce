//! Authentication middleware
//!
//! | access cookie | `require_auth`                  | `forbid_auth` |
//! |---------------|---------------------------------|---------------|
//! | absent        | 401                             | continue      |
//! | valid         | attach identity, continue       | 403           |
//! | expired       | 401 `refreshable: true`         | continue      |
//! | malformed     | 403, both cookies cleared       | continue      |
//! | bad signature | 403, both cookies cleared       | continue      |
//!
//! `require_refresh` guards the refresh endpoint and looks only at the
//! refresh cookie: expired or bad signature is 401, malformed is 403, and
//! all three clear both cookies. Token failures end the request here and
//! never reach the handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use ledger_common::{AppError, SessionIdentity, TokenError};
use ledger_core::UserId;
use tracing::{debug, error, warn};

use crate::response::ApiError;
use crate::state::AppState;

/// Identity attached by [`require_refresh`]: who, and when their session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSession {
    pub user_id: UserId,
    /// Absolute expiry of the presented refresh token; rotation must not pass it
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Seconds left on the presented refresh token
    pub fn remaining_secs(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Reject requests without a valid access token
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let sessions = state.sessions();
    let Some(token) = sessions.access_token(&jar) else {
        return ApiError::from(AppError::MissingAuth).into_response();
    };

    match sessions.verify_access(token) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(TokenError::Expired) => {
            debug!("Access token expired");
            ApiError::from(AppError::TokenExpired).into_response_with(Some(true))
        }
        Err(TokenError::Malformed | TokenError::BadSignature) => {
            warn!("Unverifiable access token, clearing session");
            (
                sessions.clear(jar),
                ApiError::from(AppError::InvalidToken),
            )
                .into_response()
        }
        Err(TokenError::Unexpected(reason)) => {
            error!(%reason, "Access token verification failed");
            ApiError::from(AppError::InvalidToken).into_response()
        }
    }
}

/// Reject requests that already carry a valid session
pub async fn forbid_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let sessions = state.sessions();
    let authenticated = sessions
        .access_token(&jar)
        .is_some_and(|token| sessions.verify_access(token).is_ok());

    if authenticated {
        return ApiError::from(AppError::AlreadyAuthenticated).into_response();
    }
    next.run(request).await
}

/// Guard for the refresh endpoint
pub async fn require_refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let sessions = state.sessions();
    let Some(token) = sessions.refresh_token(&jar) else {
        return ApiError::from(AppError::MissingAuth).into_response();
    };

    match sessions.verify_refresh(token) {
        Ok(SessionIdentity {
            user_id,
            expires_at,
            ..
        }) => {
            request
                .extensions_mut()
                .insert(RefreshSession { user_id, expires_at });
            next.run(request).await
        }
        Err(TokenError::Expired) => {
            debug!("Refresh token expired, clearing session");
            (sessions.clear(jar), ApiError::from(AppError::TokenExpired)).into_response()
        }
        Err(TokenError::BadSignature) => {
            warn!("Refresh token signature mismatch, clearing session");
            (sessions.clear(jar), ApiError::from(AppError::InvalidSignature)).into_response()
        }
        Err(TokenError::Malformed) => {
            warn!("Malformed refresh token, clearing session");
            (sessions.clear(jar), ApiError::from(AppError::InvalidToken)).into_response()
        }
        Err(TokenError::Unexpected(reason)) => {
            error!(%reason, "Refresh token verification failed");
            ApiError::from(AppError::InvalidToken).into_response()
        }
    }
}
