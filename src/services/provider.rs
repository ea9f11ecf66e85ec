//! Provider seam for historical market data.
//!
//! The pipeline only needs "fetch OHLCV bars for a symbol at an interval
//! within an optional window"; the trait keeps the network client
//! swappable in tests.

use chrono::{DateTime, Utc};
use thiserror::Error as ThisError;

/// Errors surfaced by a history provider
#[derive(ThisError, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No data returned")]
    NoData,
}

/// Requested fetch window. `start == None` means full available history.
#[derive(Debug, Clone, Copy)]
pub struct FetchRange {
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

/// One raw bar as returned by the provider, before cleaning.
///
/// Yahoo pads non-trading slots with nulls, so every field except the
/// timestamp stays optional until the transform drops incomplete rows.
#[derive(Debug, Clone)]
pub struct RawBar {
    pub time: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// A source of historical OHLCV series
#[allow(async_fn_in_trait)]
pub trait HistoryProvider {
    /// Fetch bars for `symbol` at `interval` granularity within `range`.
    ///
    /// An empty series is a valid result; the caller decides whether
    /// that is an error.
    async fn fetch_history(
        &self,
        symbol: &str,
        interval: &str,
        range: FetchRange,
    ) -> Result<Vec<RawBar>, ProviderError>;
}
