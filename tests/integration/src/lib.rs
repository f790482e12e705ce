//! Integration test utilities for the ledger API
//!
//! Spawns the real server against PostgreSQL and drives it over HTTP,
//! replaying session cookies by hand.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
