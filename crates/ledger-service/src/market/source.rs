//! Upstream market data source
//!
//! The upstream API is rate limited and answers throttled calls with HTTP 200
//! and a `Note`/`Information` body, so the body is inspected as well as the status.

use std::time::Duration;

use async_trait::async_trait;
use ledger_common::MarketConfig;
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Market data fetch errors
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Market API key is not configured")]
    MissingApiKey,

    #[error("Request for {0} timed out")]
    Timeout(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream rejected {function}: {message}")]
    Rejected { function: String, message: String },
}

/// Source of the three parts of the economy aggregate
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Macro indicators (GDP, CPI, unemployment, interest rate)
    async fn fetch_indicators(&self) -> Result<Value, MarketError>;

    /// Market news feed
    async fn fetch_news(&self) -> Result<Value, MarketError>;

    /// Top gainers, losers, and most active tickers
    async fn fetch_movers(&self) -> Result<Value, MarketError>;
}

/// Alpha Vantage query API client
#[derive(Debug, Clone)]
pub struct AlphaVantageSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageSource {
    /// Build a client; each request is bounded by the configured timeout
    pub fn new(config: &MarketConfig) -> Result<Self, MarketError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent("ledger-api")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    #[instrument(skip(self, params))]
    async fn query(&self, function: &'static str, params: &[(&str, &str)]) -> Result<Value, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::MissingApiKey)?;

        let body: Value = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[("function", function), ("apikey", api_key)])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_body(function, body)
    }
}

/// Reject throttling and error payloads that arrive with a success status
fn check_body(function: &str, body: Value) -> Result<Value, MarketError> {
    for key in ["Note", "Information", "Error Message"] {
        if let Some(message) = body.get(key) {
            return Err(MarketError::Rejected {
                function: function.to_string(),
                message: message.as_str().unwrap_or_default().to_string(),
            });
        }
    }
    debug!(function, "Upstream call succeeded");
    Ok(body)
}

#[async_trait]
impl MarketSource for AlphaVantageSource {
    async fn fetch_indicators(&self) -> Result<Value, MarketError> {
        let (real_gdp, cpi, unemployment, federal_funds_rate) = tokio::try_join!(
            self.query("REAL_GDP", &[("interval", "annual")]),
            self.query("CPI", &[("interval", "monthly")]),
            self.query("UNEMPLOYMENT", &[]),
            self.query("FEDERAL_FUNDS_RATE", &[("interval", "monthly")]),
        )?;

        Ok(json!({
            "real_gdp": real_gdp,
            "cpi": cpi,
            "unemployment": unemployment,
            "federal_funds_rate": federal_funds_rate,
        }))
    }

    async fn fetch_news(&self) -> Result<Value, MarketError> {
        self.query("NEWS_SENTIMENT", &[("topics", "economy_macro"), ("limit", "20")])
            .await
    }

    async fn fetch_movers(&self) -> Result<Value, MarketError> {
        self.query("TOP_GAINERS_LOSERS", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttled_body_is_rejected() {
        let body = json!({ "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day." });
        let err = check_body("CPI", body).unwrap_err();
        assert!(matches!(err, MarketError::Rejected { function, .. } if function == "CPI"));

        let body = json!({ "Error Message": "Invalid API call." });
        assert!(check_body("CPI", body).is_err());
    }

    #[test]
    fn test_data_body_passes() {
        let body = json!({ "name": "CPI", "data": [] });
        assert_eq!(check_body("CPI", body.clone()).unwrap(), body);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let source = AlphaVantageSource::new(&MarketConfig::with_defaults()).unwrap();
        assert!(matches!(source.fetch_movers().await, Err(MarketError::MissingApiKey)));
    }
}
