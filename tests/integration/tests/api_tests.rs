//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET (REDIS_URL optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, Session, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user; the returned session holds both cookies
async fn signed_up(server: &TestServer) -> (RegisterRequest, Session) {
    let request = RegisterRequest::unique();
    let mut session = Session::default();
    let response = server
        .post_with("/api/v1/auth/register", &mut session, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    (request, session)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_register_sets_cookies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, mut session) = signed_up(&server).await;

    assert!(session.get("access_token").is_some());
    assert!(session.get("refresh_token").is_some());

    let response = server.get_with("/api/v1/users/me", &mut session).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.email, request.email);
    assert_eq!(user.display_name, request.display_name);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signed_up(&server).await;

    let response = server
        .post_with("/api/v1/auth/register", &mut Session::default(), &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signed_up(&server).await;

    let mut session = Session::default();
    let response = server
        .post_with("/api/v1/auth/login", &mut session, &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.email, request.email);
    assert!(session.get("access_token").is_some());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass1".to_string(),
    };

    let mut session = Session::default();
    let response = server
        .post_with("/api/v1/auth/login", &mut session, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_login_while_signed_in() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, mut session) = signed_up(&server).await;

    let response = server
        .post_with("/api/v1/auth/login", &mut session, &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let response = server.post_empty("/api/v1/auth/refresh", &mut session).await.unwrap();
    let status: AuthStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.authenticated);

    let response = server.get_with("/api/v1/users/me", &mut session).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_tampered_cookie_ends_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = signed_up(&server).await;

    let mut session = Session::default();
    let login = server
        .post_with("/api/v1/auth/login", &mut session, &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(login, StatusCode::OK).await.unwrap();

    let access = session.get("access_token").unwrap().to_string();
    let mut tampered = Session::default();
    let forged = reqwest::Client::new()
        .get(format!("{}/api/v1/users/me", server.base_url()))
        .header("cookie", format!("access_token={access}x"))
        .send()
        .await
        .unwrap();
    tampered.absorb(&forged);

    let error: ErrorResponse = assert_json(forged, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "INVALID_TOKEN");
    assert!(tampered.is_empty());
}

#[tokio::test]
async fn test_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let response = server.post_empty("/api/v1/auth/logout", &mut session).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert!(session.is_empty());

    let response = server.get_with("/api/v1/users/me", &mut session).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.post_empty("/api/v1/auth/logout", &mut session).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_status() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/auth/status").await.unwrap();
    let status: AuthStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!status.authenticated);

    let (_, mut session) = signed_up(&server).await;
    let response = server.get_with("/api/v1/auth/status", &mut session).await.unwrap();
    let status: AuthStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.authenticated);
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_account_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let response = server
        .post_with("/api/v1/accounts", &mut session, &CreateAccountRequest::checking(5_000))
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(account.balance_cents, 5_000);

    // Warm the cache, then change the row behind it
    let response = server.get_with("/api/v1/accounts", &mut session).await.unwrap();
    let accounts: Vec<AccountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accounts.len(), 1);

    let response = server
        .patch_with(
            &format!("/api/v1/accounts/{}", account.id),
            &mut session,
            &serde_json::json!({ "name": "Renamed" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_with("/api/v1/accounts", &mut session).await.unwrap();
    let accounts: Vec<AccountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accounts[0].name, "Renamed");

    let response = server
        .delete_with(&format!("/api/v1/accounts/{}", account.id), &mut session)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_with("/api/v1/accounts", &mut session).await.unwrap();
    let accounts: Vec<AccountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn test_reorder_accounts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let mut ids = Vec::new();
    for balance in [100, 200, 300] {
        let response = server
            .post_with("/api/v1/accounts", &mut session, &CreateAccountRequest::checking(balance))
            .await
            .unwrap();
        let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(account.id);
    }
    ids.reverse();

    let response = server
        .put_with("/api/v1/accounts/order", &mut session, &ReorderRequest { order: ids.clone() })
        .await
        .unwrap();
    let accounts: Vec<AccountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed: Vec<String> = accounts.into_iter().map(|a| a.id).collect();
    assert_eq!(listed, ids);

    // An incomplete order is rejected and changes nothing
    let response = server
        .put_with(
            "/api/v1/accounts/order",
            &mut session,
            &ReorderRequest { order: ids[..2].to_vec() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Budget Tests
// ============================================================================

#[tokio::test]
async fn test_budget_duplicate_category() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let budget = CreateBudgetRequest::new("Groceries", 40_000);
    let response = server.post_with("/api/v1/budgets", &mut session, &budget).await.unwrap();
    let created: BudgetResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.remaining_cents, 40_000);

    let response = server.post_with("/api/v1/budgets", &mut session, &budget).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get_with("/api/v1/budgets", &mut session).await.unwrap();
    let budgets: Vec<BudgetResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(budgets.len(), 1);
}

// ============================================================================
// Transaction and Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_transaction_updates_dashboard() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, mut session) = signed_up(&server).await;

    let response = server
        .post_with("/api/v1/accounts", &mut session, &CreateAccountRequest::checking(10_000))
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_with("/api/v1/dashboard", &mut session).await.unwrap();
    let dashboard: DashboardResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard.summary.net_worth_cents, 10_000);
    assert!(dashboard.economy.is_object());

    let response = server
        .post_with(
            "/api/v1/transactions",
            &mut session,
            &CreateTransactionRequest {
                account_id: account.id.clone(),
                description: "Rent".to_string(),
                amount_cents: -2_500,
            },
        )
        .await
        .unwrap();
    let transaction: TransactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(transaction.account_id, account.id);

    let response = server.get_with("/api/v1/dashboard", &mut session).await.unwrap();
    let dashboard: DashboardResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dashboard.summary.net_worth_cents, 7_500);

    let response = server
        .get_with(&format!("/api/v1/accounts/{}/transactions", account.id), &mut session)
        .await
        .unwrap();
    let transactions: Vec<TransactionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount_cents, -2_500);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    for path in ["/api/v1/accounts", "/api/v1/budgets", "/api/v1/dashboard", "/api/v1/users/me"] {
        let response = server.get(path).await.unwrap();
        let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(error.error.code, "MISSING_AUTH");
        assert!(error.refreshable.is_none());
    }
}
