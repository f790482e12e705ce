//! Error handling utilities for repositories
//!
//! Unique violations on the ledger's own constraints become domain conflicts;
//! everything else is a `DatabaseError`.

use ledger_core::DomainError;
use sqlx::Error as SqlxError;

/// `users_email_lower_idx` in `0001_init.sql`
const EMAIL_UNIQUE: &str = "users_email_lower_idx";

/// `budgets_user_category_key` in `0001_init.sql`
const BUDGET_CATEGORY_UNIQUE: &str = "budgets_user_category_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    map_write_error(e, "")
}

/// [`map_db_error`] for budget writes, naming the category that collided
pub fn map_budget_error(category: &str) -> impl FnOnce(SqlxError) -> DomainError + '_ {
    move |e| map_write_error(e, category)
}

fn map_write_error(e: SqlxError, category: &str) -> DomainError {
    e.as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
        .and_then(|constraint| conflict(constraint, category))
        .unwrap_or_else(|| DomainError::DatabaseError(e.to_string()))
}

fn conflict(constraint: &str, category: &str) -> Option<DomainError> {
    match constraint {
        EMAIL_UNIQUE => Some(DomainError::EmailAlreadyExists),
        BUDGET_CATEGORY_UNIQUE => Some(DomainError::BudgetCategoryExists(category.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_constraints_are_conflicts() {
        assert!(matches!(
            conflict(EMAIL_UNIQUE, ""),
            Some(DomainError::EmailAlreadyExists)
        ));
        assert!(matches!(
            conflict(BUDGET_CATEGORY_UNIQUE, "Groceries"),
            Some(DomainError::BudgetCategoryExists(c)) if c == "Groceries"
        ));
        assert!(conflict("accounts_pkey", "").is_none());
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        assert!(matches!(
            map_db_error(SqlxError::RowNotFound),
            DomainError::DatabaseError(_)
        ));
        assert!(matches!(
            map_budget_error("Rent")(SqlxError::PoolTimedOut),
            DomainError::DatabaseError(_)
        ));
    }
}
