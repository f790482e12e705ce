//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! request.

pub mod account;
pub mod auth;
pub mod budget;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod transaction;

pub use account::AccountService;
pub use auth::AuthService;
pub use budget::BudgetService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dashboard::{DashboardService, DashboardSummary};
pub use error::{ServiceError, ServiceResult};
pub use transaction::TransactionService;
