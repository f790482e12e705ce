//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Money amounts are integer cents.

use chrono::NaiveDate;
use ledger_core::{AccountId, AccountKind, BudgetPeriod};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Account Requests
// ============================================================================

/// Create account request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 64, message = "Account name must be 1-64 characters"))]
    pub name: String,

    #[serde(default)]
    pub kind: AccountKind,

    /// Opening balance
    #[serde(default)]
    pub balance_cents: i64,
}

/// Update account request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 64, message = "Account name must be 1-64 characters"))]
    pub name: Option<String>,

    pub kind: Option<AccountKind>,

    pub balance_cents: Option<i64>,
}

// ============================================================================
// Budget Requests
// ============================================================================

/// Create budget request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBudgetRequest {
    #[validate(length(min = 1, max = 64, message = "Category must be 1-64 characters"))]
    pub category: String,

    #[validate(range(min = 0, message = "Limit cannot be negative"))]
    pub limit_cents: i64,

    #[serde(default)]
    pub period: BudgetPeriod,
}

/// Update budget request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBudgetRequest {
    #[validate(length(min = 1, max = 64, message = "Category must be 1-64 characters"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Limit cannot be negative"))]
    pub limit_cents: Option<i64>,

    #[validate(range(min = 0, message = "Spent amount cannot be negative"))]
    pub spent_cents: Option<i64>,

    pub period: Option<BudgetPeriod>,
}

// ============================================================================
// Ordering
// ============================================================================

/// New display order: every id of the collection, each exactly once
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest<T> {
    pub order: Vec<T>,
}

// Completeness of the order is checked against the stored rows, not here
impl<T> Validate for ReorderRequest<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

// ============================================================================
// Transaction Requests
// ============================================================================

/// Create transaction request
///
/// Positive amounts are deposits, negative amounts withdrawals.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub account_id: AccountId,

    #[validate(length(min = 1, max = 200, message = "Description must be 1-200 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 64, message = "Category must be 1-64 characters"))]
    pub category: Option<String>,

    pub amount_cents: i64,

    /// Defaults to today (UTC)
    pub occurred_on: Option<NaiveDate>,
}
