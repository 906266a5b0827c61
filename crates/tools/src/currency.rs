//! Exchange rate client
//!
//! Cross rates are derived from a single base-currency snapshot (USD,
//! or EUR when converting from USD). Rates are cached per ordered
//! currency pair for a bounded time; the cache is consulted before any
//! network call.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Exchange rate failures
#[derive(Error, Debug)]
pub enum RateError {
    #[error("Currency '{0}' not supported")]
    UnsupportedCurrency(String),

    #[error("Exchange rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response from exchange rate API: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

struct CachedRate {
    rate: f64,
    fetched_at: Instant,
}

/// HTTP client for exchange rates with a time-bounded cache
pub struct CurrencyRateClient {
    http: reqwest::Client,
    base_url: String,
    cache_ttl: Duration,
    cache: Mutex<HashMap<(String, String), CachedRate>>,
}

impl CurrencyRateClient {
    /// Create a client. `base_url` is the latest-rates endpoint with a
    /// trailing slash; the base currency code is appended to it.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache_ttl: Duration,
    ) -> Result<Self, RateError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            cache_ttl,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Exchange rate from one currency to another
    pub async fn rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        let key = (from.clone(), to.clone());

        if let Some(cached) = self.cache.lock().get(&key) {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                return Ok(cached.rate);
            }
        }

        let rate = self.fetch_rate(&from, &to).await?;
        self.cache.lock().insert(
            key,
            CachedRate {
                rate,
                fetched_at: Instant::now(),
            },
        );
        Ok(rate)
    }

    /// Convert an amount, rounded to 2 decimals. Identical codes
    /// short-circuit without a lookup.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(amount);
        }
        let rate = self.rate(from, to).await?;
        Ok((amount * rate * 100.0).round() / 100.0)
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        // Snapshot against a fixed base so one request covers both legs
        let base = if from != "USD" { "USD" } else { "EUR" };
        let url = format!("{}{}", self.base_url, base);

        debug!(%url, from, to, "fetching exchange rates");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let data: RatesResponse = response
            .json()
            .await
            .map_err(|e| RateError::MalformedResponse(e.to_string()))?;

        let from_rate = data
            .rates
            .get(from)
            .copied()
            .ok_or_else(|| RateError::UnsupportedCurrency(from.to_string()))?;
        let to_rate = data
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| RateError::UnsupportedCurrency(to.to_string()))?;

        // 1 unit of `from` = (1 / from_rate) base units = to_rate / from_rate
        Ok(to_rate / from_rate)
    }

    #[cfg(test)]
    fn seed(&self, from: &str, to: &str, rate: f64) {
        self.cache.lock().insert(
            (from.to_string(), to.to_string()),
            CachedRate {
                rate,
                fetched_at: Instant::now(),
            },
        );
    }
}
