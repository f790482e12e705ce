//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AccountId, BudgetId, TransactionId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Budget not found: {0}")]
    BudgetNotFound(BudgetId),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Order must list every item exactly once")]
    InvalidOrder,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Budget already exists for category: {0}")]
    BudgetCategoryExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::BudgetNotFound(_) => "UNKNOWN_BUDGET",
            Self::TransactionNotFound(_) => "UNKNOWN_TRANSACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidOrder => "INVALID_ORDER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::BudgetCategoryExists(_) => "BUDGET_CATEGORY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Request field the error refers to, used to key client-facing error maps
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::UserNotFound(_) => Some("user"),
            Self::AccountNotFound(_) => Some("account"),
            Self::BudgetNotFound(_) => Some("budget"),
            Self::TransactionNotFound(_) => Some("transaction"),
            Self::WeakPassword(_) => Some("password"),
            Self::InvalidOrder => Some("order"),
            Self::EmailAlreadyExists => Some("email"),
            Self::BudgetCategoryExists(_) => Some("category"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::AccountNotFound(_)
                | Self::BudgetNotFound(_)
                | Self::TransactionNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::WeakPassword(_) | Self::InvalidOrder
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::BudgetCategoryExists(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::AccountNotFound(AccountId::new());
        assert_eq!(err.code(), "UNKNOWN_ACCOUNT");

        let err = DomainError::EmailAlreadyExists;
        assert_eq!(err.code(), "EMAIL_ALREADY_EXISTS");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::AccountNotFound(AccountId::new()).is_not_found());
        assert!(DomainError::BudgetNotFound(BudgetId::new()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(DomainError::AccountNotFound(AccountId::new()).field(), Some("account"));
        assert_eq!(DomainError::DatabaseError("x".to_string()).field(), None);
    }

    #[test]
    fn test_error_display() {
        let id = BudgetId::new();
        let err = DomainError::BudgetNotFound(id);
        assert_eq!(err.to_string(), format!("Budget not found: {id}"));
    }
}
