//! # ledger-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `ledger-core`:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations; balance changes and reorders run in one
//!   database transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_db::{create_pool, run_migrations, DatabaseConfig, PgAccountRepository};
//! use ledger_core::AccountRepository;
//!
//! let pool = create_pool(&DatabaseConfig::from(&app_config.database)).await?;
//! run_migrations(&pool).await?;
//! let accounts = PgAccountRepository::new(pool).find_by_user(user_id).await?;
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccountRepository, PgBudgetRepository, PgEconomyRepository, PgTransactionRepository,
    PgUserRepository,
};
