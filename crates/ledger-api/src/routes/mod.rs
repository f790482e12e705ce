//! Route definitions
//!
//! API routes are mounted under /api/v1 and grouped by the session gate
//! they sit behind.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{accounts, auth, budgets, dashboard, health, transactions, users};
use crate::session::{forbid_auth, require_auth, require_refresh};
use crate::state::AppState;

/// Create the API router with its session middleware
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes(state))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(session_routes())
        .merge(anonymous_routes(state))
        .merge(refresh_routes(state))
        .merge(protected_routes(state))
}

/// Open to everyone; they inspect or clear cookies themselves
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/status", get(auth::status))
        .route("/auth/logout", post(auth::logout))
}

/// Only reachable without a valid session
fn anonymous_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route_layer(from_fn_with_state(state.clone(), forbid_auth))
}

fn refresh_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/refresh", post(auth::refresh))
        .route_layer(from_fn_with_state(state.clone(), require_refresh))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::get_current_user))
        // Accounts
        .route("/accounts", get(accounts::list_accounts).post(accounts::create_account))
        .route("/accounts/order", put(accounts::reorder_accounts))
        .route(
            "/accounts/:account_id",
            patch(accounts::update_account).delete(accounts::delete_account),
        )
        .route(
            "/accounts/:account_id/transactions",
            get(transactions::list_transactions),
        )
        // Transactions
        .route("/transactions", post(transactions::create_transaction))
        .route(
            "/transactions/:transaction_id",
            delete(transactions::delete_transaction),
        )
        // Budgets
        .route("/budgets", get(budgets::list_budgets).post(budgets::create_budget))
        .route("/budgets/order", put(budgets::reorder_budgets))
        .route(
            "/budgets/:budget_id",
            patch(budgets::update_budget).delete(budgets::delete_budget),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}
