//! GeckoTerminal OHLCV client.
//!
//! `GET {base}/networks/{network}/pools/{pool}/ohlcv/{minute|hour}?aggregate={n}&limit={count}`
//! answers with `{"data":{"attributes":{"ohlcv_list":[[ts, o, h, l, c, v], ...]}}}`,
//! newest candle first. Rate-limited requests (429) are retried with a doubling
//! delay; an unknown pool (404) fails at once.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use shared::models::{Candle, CandleSeries, TimeFrame};
use std::time::Duration;

use super::CandleSource;
use crate::config::settings::EngineSettings;
use crate::error::EngineError;

#[derive(Debug, Deserialize)]
struct OhlcvResponse {
    data: OhlcvData,
}

#[derive(Debug, Deserialize)]
struct OhlcvData {
    attributes: OhlcvAttributes,
}

#[derive(Debug, Deserialize)]
struct OhlcvAttributes {
    ohlcv_list: Vec<[f64; 6]>,
}

impl OhlcvAttributes {
    fn into_series(self) -> CandleSeries {
        let candles = self
            .ohlcv_list
            .into_iter()
            .map(|[timestamp, open, high, low, close, volume]| Candle {
                timestamp: timestamp as i64,
                open,
                high,
                low,
                close,
                volume,
            })
            .collect();
        CandleSeries::from_candles(candles)
    }
}

/// Attempt budget for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            initial_delay: Duration::from_secs(10),
        }
    }
}

pub struct GeckoTerminalClient {
    http: Client,
    base_url: Url,
    network: String,
    retry: RetryPolicy,
}

impl GeckoTerminalClient {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        let retry = RetryPolicy {
            max_attempts: settings.max_attempts,
            initial_delay: Duration::from_millis(settings.initial_retry_delay_ms),
        };
        Self::with_client(http, &settings.api_base_url, &settings.network, retry)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        network: &str,
        retry: RetryPolicy,
    ) -> Result<Self, EngineError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            EngineError::ConfigError(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EngineError::ConfigError(format!(
                "API base URL '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self {
            http,
            base_url,
            network: network.to_string(),
            retry,
        })
    }

    pub fn ohlcv_url(&self, pool_id: &str, timeframe: TimeFrame) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "networks",
                self.network.as_str(),
                "pools",
                pool_id,
                "ohlcv",
                timeframe.unit().as_str(),
            ]);
        }
        url.query_pairs_mut()
            .append_pair("aggregate", &timeframe.aggregate().to_string())
            .append_pair("limit", &timeframe.candle_limit().to_string());
        url
    }

    async fn request_once(&self, url: &Url) -> Result<CandleSeries, EngineError> {
        let response = self.http.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::error!(url = %url, "Error 404: Not Found");
                Err(EngineError::NotFound("Pool address not found.".to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(EngineError::RateLimited),
            status if !status.is_success() => Err(EngineError::FetchError(format!(
                "Upstream returned {} for {}",
                status, url
            ))),
            _ => {
                let body: OhlcvResponse = response.json().await.map_err(|e| {
                    EngineError::FetchError(format!("Malformed OHLCV response from {}: {}", url, e))
                })?;
                Ok(body.data.attributes.into_series())
            }
        }
    }
}

#[async_trait]
impl CandleSource for GeckoTerminalClient {
    async fn fetch_candles(
        &self,
        pool_id: &str,
        timeframe: TimeFrame,
    ) -> Result<CandleSeries, EngineError> {
        let url = self.ohlcv_url(pool_id, timeframe);
        let mut delay = self.retry.initial_delay;

        for attempt in 1..=self.retry.max_attempts {
            match self.request_once(&url).await {
                Ok(series) => {
                    tracing::debug!(
                        pool = %pool_id,
                        ?timeframe,
                        attempt,
                        count = series.len(),
                        "Fetched candles"
                    );
                    return Ok(series);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        pool = %pool_id,
                        ?timeframe,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limit exceeded. Retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) if e.is_retryable() => break,
                Err(e) => return Err(e),
            }
        }

        Err(EngineError::FetchError(format!(
            "Failed to fetch data after {} attempts.",
            self.retry.max_attempts
        )))
    }
}
