//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use ledger_cache::{CacheBackend, MemoryCache, RedisPool};
use ledger_common::{AppConfig, AppError, TokenCodec};
use ledger_db::{
    create_pool, run_migrations, PgAccountRepository, PgBudgetRepository, PgEconomyRepository,
    PgTransactionRepository, PgUserRepository,
};
use ledger_service::{AlphaVantageSource, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::session::SessionCookies;
use crate::state::AppState;

/// How often expired entries are swept from the in-process cache
const MEMORY_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware so probes are never rate limited.
pub fn create_app(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let api = apply_middleware(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(api.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&ledger_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let cache: Arc<dyn CacheBackend> = match &config.redis {
        Some(redis) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis pool ready");
            Arc::new(redis_pool)
        }
        None => {
            warn!("REDIS_URL not set, using the in-process cache");
            let memory = Arc::new(MemoryCache::new());
            spawn_memory_purge(Arc::clone(&memory));
            memory
        }
    };

    let source = AlphaVantageSource::new(&config.market)
        .map_err(|e| AppError::Config(e.to_string()))?;
    if config.market.api_key.is_none() {
        warn!("MARKET_API_KEY not set, economy data will come from the bundled fallback");
    }

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .cache(cache)
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .account_repo(Arc::new(PgAccountRepository::new(pool.clone())))
        .budget_repo(Arc::new(PgBudgetRepository::new(pool.clone())))
        .transaction_repo(Arc::new(PgTransactionRepository::new(pool.clone())))
        .economy_repo(Arc::new(PgEconomyRepository::new(pool)))
        .market_source(Arc::new(source))
        .fetch_timeout(Duration::from_secs(config.market.fetch_timeout_secs))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let codec = Arc::new(TokenCodec::new(&config.jwt.secret));
    let sessions = SessionCookies::new(codec, &config.jwt, &config.cookies);

    Ok(AppState::new(service_context, sessions))
}

fn spawn_memory_purge(cache: Arc<MemoryCache>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MEMORY_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            cache.purge_expired();
        }
    });
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(&config).await?;
    let app = create_app(state, &config)?;

    run_server(app, addr).await
}
