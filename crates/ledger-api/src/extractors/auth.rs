//! Session identity extractors
//!
//! The session middleware verifies the cookie and leaves the result in the
//! request extensions; these extractors only read it back. Finding nothing
//! means the route was mounted without its middleware.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use ledger_common::{AppError, SessionIdentity};
use ledger_core::UserId;

use crate::response::ApiError;
use crate::session::RefreshSession;

/// Authenticated user behind `require_auth`
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub session: SessionIdentity,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionIdentity>()
            .copied()
            .ok_or(ApiError::App(AppError::MissingAuth))?;

        Ok(Self {
            user_id: session.user_id,
            session,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RefreshSession>()
            .copied()
            .ok_or(ApiError::App(AppError::MissingAuth))
    }
}
