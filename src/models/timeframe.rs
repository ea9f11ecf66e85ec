use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::constants::HOURLY_LOOKBACK_DAYS;

/// Bar granularity for a fetch request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Hourly candles
    Hour1,
    /// Daily candles
    Day1,
    /// Weekly candles
    Week1,
    /// Monthly candles
    Month1,
}

impl Timeframe {
    /// Identifier used on the CLI and in the timeframe catalog.
    pub fn id(&self) -> &'static str {
        self.interval()
    }

    /// Provider interval code sent to the chart API.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::Hour1 => "1h",
            Timeframe::Day1 => "1d",
            Timeframe::Week1 => "1wk",
            Timeframe::Month1 => "1mo",
        }
    }

    /// Human-readable name for the timeframe catalog.
    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::Hour1 => "1 Hour",
            Timeframe::Day1 => "1 Day",
            Timeframe::Week1 => "1 Week",
            Timeframe::Month1 => "1 Month",
        }
    }

    /// True for timeframes finer than one day.
    ///
    /// Intraday bars keep their full timestamp in the cache file; daily
    /// and coarser bars are normalized to midnight.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Timeframe::Hour1)
    }

    /// Maximum trailing window the provider serves for this granularity.
    ///
    /// `None` means full available history can be requested.
    pub fn max_lookback_days(&self) -> Option<i64> {
        match self {
            Timeframe::Hour1 => Some(HOURLY_LOOKBACK_DAYS),
            Timeframe::Day1 | Timeframe::Week1 | Timeframe::Month1 => None,
        }
    }

    /// Resolve a user-supplied token against the timeframe table.
    ///
    /// Matches on either the id or the provider interval code. Unknown
    /// tokens degrade to daily with a warning rather than erroring.
    pub fn resolve(token: &str) -> Timeframe {
        for tf in Timeframe::all() {
            if tf.id() == token || tf.interval() == token {
                return tf;
            }
        }
        warn!("Timeframe '{}' not recognized, using default '1d'", token);
        Timeframe::Day1
    }

    /// All supported timeframes, in catalog order
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::Hour1,
            Timeframe::Day1,
            Timeframe::Week1,
            Timeframe::Month1,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interval())
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Day1
    }
}
