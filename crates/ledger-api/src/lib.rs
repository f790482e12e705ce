//! # ledger-api
//!
//! REST API for the personal-finance backend, built with Axum.
//!
//! Sessions are carried in two HTTP-only cookies (access and refresh) and
//! checked by the gates in [`session`] before any handler runs.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
