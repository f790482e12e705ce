//! Listing limit extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw `?limit=` query parameter
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Requested number of items; the service applies its default and bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit(pub Option<i64>);

#[async_trait]
impl<S> FromRequestParts<S> for Limit
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<LimitParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        match params.limit {
            Some(limit) if limit < 1 => Err(ApiError::invalid_query("limit must be positive")),
            limit => Ok(Limit(limit)),
        }
    }
}
