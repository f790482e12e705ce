//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod accounts;
pub mod auth;
pub mod budgets;
pub mod dashboard;
pub mod health;
pub mod transactions;
pub mod users;
