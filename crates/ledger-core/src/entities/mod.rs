//! Domain entities - core business objects

mod account;
mod budget;
mod economy;
mod transaction;
mod user;

pub use account::{Account, AccountChanges, AccountKind};
pub use budget::{Budget, BudgetPeriod};
pub use economy::EconomyRecord;
pub use transaction::Transaction;
pub use user::User;
