//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data, also unique across test runs against one database
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@example.com"),
            display_name: format!("Tester {suffix}"),
            password: "budget2024".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Session status response
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub refreshable: bool,
}

/// Create account request
#[derive(Debug, Serialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub kind: String,
    pub balance_cents: i64,
}

impl CreateAccountRequest {
    pub fn checking(balance_cents: i64) -> Self {
        Self {
            name: format!("Checking {}", unique_suffix()),
            kind: "checking".to_string(),
            balance_cents,
        }
    }
}

/// Account response
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub balance_cents: i64,
    pub position: i32,
}

/// Create budget request
#[derive(Debug, Serialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub limit_cents: i64,
}

impl CreateBudgetRequest {
    pub fn new(category: &str, limit_cents: i64) -> Self {
        Self {
            category: category.to_string(),
            limit_cents,
        }
    }
}

/// Budget response
#[derive(Debug, Deserialize)]
pub struct BudgetResponse {
    pub id: String,
    pub category: String,
    pub limit_cents: i64,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub position: i32,
}

/// Create transaction request
#[derive(Debug, Serialize)]
pub struct CreateTransactionRequest {
    pub account_id: String,
    pub description: String,
    pub amount_cents: i64,
}

/// Transaction response
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    pub account_id: String,
    pub amount_cents: i64,
}

/// Reorder request
#[derive(Debug, Serialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

/// Dashboard summary
#[derive(Debug, Deserialize)]
pub struct DashboardSummary {
    pub net_worth_cents: i64,
    pub account_count: usize,
    pub budgeted_cents: i64,
    pub spent_cents: i64,
}

/// Dashboard response
#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub economy: serde_json::Value,
    pub economy_source: String,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub refreshable: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
