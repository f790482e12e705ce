//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod budget;
mod economy;
mod transaction;
mod user;

pub use account::AccountModel;
pub use budget::BudgetModel;
pub use economy::EconomyModel;
pub use transaction::TransactionModel;
pub use user::UserModel;
