//! Market data snapshot model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the economy table
#[derive(Debug, Clone, FromRow)]
pub struct EconomyModel {
    pub time: DateTime<Utc>,
    pub data: Json<serde_json::Value>,
}
