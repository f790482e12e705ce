//! # ledger-service
//!
//! Application layer: business services over the repositories, per-user
//! read-through caching, and the guarded refresh of shared market data.

pub mod dto;
pub mod market;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use market::{AlphaVantageSource, EconomyGuard, EconomySnapshot, MarketSource, SnapshotOrigin};
pub use services::{
    AccountService, AuthService, BudgetService, DashboardService, DashboardSummary,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TransactionService,
};
