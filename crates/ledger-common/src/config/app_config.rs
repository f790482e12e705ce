//! Application configuration
//!
//! Loaded once at startup from environment variables (and a `.env` file when present).

use std::env;
use std::str::FromStr;

use crate::auth::TokenLifetime;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// `None` selects the in-process cache
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub cookies: CookieConfig,
    pub market: MarketConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl: TokenLifetime,
    pub refresh_token_ttl: TokenLifetime,
}

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// `Secure` attribute; only ever disabled for plain-HTTP local development
    pub secure: bool,
    /// Path the refresh cookie is scoped to
    pub refresh_path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            refresh_path: default_refresh_path(),
        }
    }
}

/// Third-party market data API
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub fetch_timeout_secs: u64,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "ledger".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_ttl() -> TokenLifetime {
    TokenLifetime::Relative(chrono::Duration::minutes(60))
}

fn default_refresh_token_ttl() -> TokenLifetime {
    TokenLifetime::Relative(chrono::Duration::days(7))
}

fn default_refresh_path() -> String {
    "/api/v1/auth/refresh".to_string()
}

fn default_market_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    8
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Read an optional variable, failing only when it is set but unparsable
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env = env::var("APP_ENV")
            .ok()
            .and_then(|s| Environment::parse(&s))
            .unwrap_or_default();

        let secret = required_var("JWT_SECRET")?;
        if env.is_production() && secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                "must be at least 32 bytes in production".to_string(),
            ));
        }

        let redis = match env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()) {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: parse_var("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            }),
            None => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("API_PORT")?.unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: required_var("DATABASE_URL")?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            redis,
            jwt: JwtConfig {
                secret,
                access_token_ttl: parse_var("JWT_ACCESS_TOKEN_TTL")?
                    .unwrap_or_else(default_access_token_ttl),
                refresh_token_ttl: parse_var("JWT_REFRESH_TOKEN_TTL")?
                    .unwrap_or_else(default_refresh_token_ttl),
            },
            cookies: CookieConfig {
                secure: parse_var("COOKIE_SECURE")?.unwrap_or(true),
                refresh_path: env::var("COOKIE_REFRESH_PATH")
                    .unwrap_or_else(|_| default_refresh_path()),
            },
            market: MarketConfig {
                base_url: env::var("MARKET_API_BASE_URL")
                    .unwrap_or_else(|_| default_market_base_url()),
                api_key: env::var("MARKET_API_KEY").ok().filter(|v| !v.trim().is_empty()),
                fetch_timeout_secs: parse_var("MARKET_FETCH_TIMEOUT_SECS")?
                    .unwrap_or_else(default_fetch_timeout_secs),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

impl MarketConfig {
    /// Configuration with defaults and no API key
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: default_market_base_url(),
            api_key: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl JwtConfig {
    /// Default lifetimes (60 minutes access, 7 days refresh) with the given secret
    #[must_use]
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
