//! Yahoo Finance chart API client.
//!
//! Fetches OHLCV history from the v8 chart endpoint. The endpoint is
//! unofficial: responses carry parallel arrays of timestamps and quote
//! fields, with nulls for non-trading slots, and the format can change
//! without notice.

use crate::services::provider::{FetchRange, HistoryProvider, ProviderError, RawBar};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

/// Base URL for the Yahoo Finance chart API
const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Yahoo rejects requests without a browser-like user agent
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance v8 chart API response
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance chart API client
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    /// Create a new client with the default timeout and user agent.
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol, interval, and window.
    fn chart_url(symbol: &str, interval: &str, range: FetchRange) -> String {
        match range.start {
            Some(start) => format!(
                "{}/{}?interval={}&period1={}&period2={}",
                BASE_URL,
                symbol,
                interval,
                start.timestamp(),
                range.end.timestamp()
            ),
            None => format!("{}/{}?interval={}&range=max", BASE_URL, symbol, interval),
        }
    }

    /// Parse the chart API response into raw bars.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<RawBar>, ProviderError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) => {
                ProviderError::InvalidResponse(format!("{}: {}", err.code, err.description))
            }
            None => ProviderError::InvalidResponse("empty result with no error".to_string()),
        })?;

        let data = result.into_iter().next().ok_or(ProviderError::NoData)?;

        let timestamps = match data.timestamp {
            Some(timestamps) if !timestamps.is_empty() => timestamps,
            // No timestamps means the symbol exists but has no bars in range
            _ => return Ok(Vec::new()),
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no quote data".to_string()))?;

        if quote.close.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "quote data has no close series".to_string(),
            ));
        }

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let time = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                ProviderError::InvalidResponse(format!("invalid timestamp: {}", ts))
            })?;
            bars.push(RawBar {
                time,
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close.get(i).copied().flatten(),
                volume: quote.volume.get(i).copied().flatten(),
            });
        }

        debug!("Parsed {} raw bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}

impl HistoryProvider for YahooClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        interval: &str,
        range: FetchRange,
    ) -> Result<Vec<RawBar>, ProviderError> {
        let url = Self::chart_url(symbol, interval, range);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Chart API returned HTTP {} for {}", status, symbol);
            return Err(ProviderError::Http(format!("HTTP {} for {}", status, symbol)));
        }

        // Read the body as text first so parse failures can be reported
        // with the offending payload kind rather than a bare serde error.
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let chart: ChartResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response for {}: {}", symbol, e))
        })?;

        Self::parse_response(symbol, chart)
    }
}
