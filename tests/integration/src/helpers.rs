//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and carrying session cookies between them.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use ledger_api::{create_app, create_app_state};
use ledger_common::AppConfig;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

/// Cookies collected from `Set-Cookie` headers, replayed on later requests
#[derive(Debug, Clone, Default)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Apply the response's `Set-Cookie` headers; empty values remove the cookie
    pub fn absorb(&mut self, response: &Response) {
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = header.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else { continue };

            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(&config).await?;
        let app = create_app(state, &config)?;

        // Port 0 lets the OS pick, so parallel tests never collide
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url(), path));

        if session.is_empty() {
            builder
        } else {
            builder.header(COOKIE, session.header())
        }
    }

    /// Send a request carrying the session's cookies and absorb the ones it sets
    pub async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        session: &mut Session,
        body: Option<&T>,
    ) -> Result<Response> {
        let mut builder = self.request(method, path, session);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        session.absorb(&response);
        Ok(response)
    }

    /// Make a GET request without cookies
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, &Session::default()).send().await?)
    }

    pub async fn get_with(&self, path: &str, session: &mut Session) -> Result<Response> {
        self.send::<()>(Method::GET, path, session, None).await
    }

    pub async fn post_with<T: Serialize>(
        &self,
        path: &str,
        session: &mut Session,
        body: &T,
    ) -> Result<Response> {
        self.send(Method::POST, path, session, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str, session: &mut Session) -> Result<Response> {
        self.send::<()>(Method::POST, path, session, None).await
    }

    pub async fn patch_with<T: Serialize>(
        &self,
        path: &str,
        session: &mut Session,
        body: &T,
    ) -> Result<Response> {
        self.send(Method::PATCH, path, session, Some(body)).await
    }

    pub async fn put_with<T: Serialize>(
        &self,
        path: &str,
        session: &mut Session,
        body: &T,
    ) -> Result<Response> {
        self.send(Method::PUT, path, session, Some(body)).await
    }

    pub async fn delete_with(&self, path: &str, session: &mut Session) -> Result<Response> {
        self.send::<()>(Method::DELETE, path, session, None).await
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
///
/// Redis is optional: without `REDIS_URL` the server uses its in-process cache.
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_header_is_sorted() {
        let mut session = Session::default();
        session.cookies.insert("refresh_token".to_string(), "r".to_string());
        session.cookies.insert("access_token".to_string(), "a".to_string());
        assert_eq!(session.header(), "access_token=a; refresh_token=r");
    }
}
