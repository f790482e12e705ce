//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ledger-core.
//! Each repository handles database operations for a specific domain entity.

mod account;
mod budget;
mod economy;
mod error;
mod transaction;
mod user;

pub use account::PgAccountRepository;
pub use budget::PgBudgetRepository;
pub use economy::PgEconomyRepository;
pub use transaction::PgTransactionRepository;
pub use user::PgUserRepository;
