//! Repository traits (ports)

mod repositories;

pub use repositories::{
    validate_order, AccountRepository, BudgetRepository, EconomyRepository, RepoResult,
    TransactionRepository, UserRepository,
};
