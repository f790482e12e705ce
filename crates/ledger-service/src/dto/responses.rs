//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::market::SnapshotOrigin;
use crate::services::DashboardSummary;

// ============================================================================
// Auth Responses
// ============================================================================

/// Session state derived from the access cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    /// The access token expired; the refresh endpoint should be called
    pub refreshable: bool,
}

impl AuthStatusResponse {
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            refreshable: false,
        }
    }

    pub fn refreshable() -> Self {
        Self {
            authenticated: false,
            refreshable: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            refreshable: false,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current user (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Finance Responses
// ============================================================================

/// Account response
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub balance_cents: i64,
    pub position: i32,
    pub updated_at: DateTime<Utc>,
}

/// Budget response
#[derive(Debug, Clone, Serialize)]
pub struct BudgetResponse {
    pub id: String,
    pub category: String,
    pub limit_cents: i64,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub period: String,
    pub position: i32,
}

/// Transaction response
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub account_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Dashboard: the user's summary plus the shared market aggregate
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub economy: serde_json::Value,
    pub economy_source: SnapshotOrigin,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub cache: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, cache_healthy: bool) -> Self {
        let all_healthy = database_healthy && cache_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                cache: if cache_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
