//! Fetch-cache-transform pipeline.
//!
//! One call per (symbol, timeframe) pair: check cache freshness, fetch
//! from the provider when stale, clean and enrich the series, and
//! overwrite the cache file. Any provider or transform failure degrades
//! to the existing cache file when one is on disk.

use crate::constants::CACHE_HOURS;
use crate::error::{AppError, Result};
use crate::models::{indicators, PriceBar, Timeframe};
use crate::services::cache;
use crate::services::provider::{FetchRange, HistoryProvider, ProviderError, RawBar};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How a fetch request was satisfied.
///
/// The stale-cache fallback contract lives in the type: a provider or
/// transform failure with a cache file on disk is `StaleFallback`, and
/// only an unrecoverable failure surfaces as an error.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Cache was within the freshness threshold; no network call made
    Fresh(PathBuf),
    /// New data fetched, transformed, and written to the cache file
    Refreshed(PathBuf),
    /// Fetch or transform failed but an earlier cache file exists
    StaleFallback { path: PathBuf, reason: String },
}

impl FetchOutcome {
    /// Path of the cache file backing this outcome.
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Fresh(path) | FetchOutcome::Refreshed(path) => path,
            FetchOutcome::StaleFallback { path, .. } => path,
        }
    }
}

/// Fetch-and-cache pipeline over a history provider
pub struct Fetcher<P: HistoryProvider> {
    provider: P,
    data_dir: PathBuf,
    cache_hours: u64,
}

impl<P: HistoryProvider> Fetcher<P> {
    /// Create a fetcher writing cache files under `data_dir`.
    pub fn new(provider: P, data_dir: PathBuf) -> Self {
        Self {
            provider,
            data_dir,
            cache_hours: CACHE_HOURS,
        }
    }

    /// Override the freshness threshold (hours).
    pub fn with_cache_hours(mut self, hours: u64) -> Self {
        self.cache_hours = hours;
        self
    }

    /// Fetch `symbol` at `timeframe`, refreshing the cache when stale.
    pub async fn fetch(&self, symbol: &str, timeframe: Timeframe) -> Result<FetchOutcome> {
        let interval = timeframe.interval();
        let cache_file = cache::cache_file_path(&self.data_dir, symbol, interval);
        debug!("Cache file path: {}", cache_file.display());

        if cache::is_cache_fresh(&cache_file, self.cache_hours) {
            info!("Using fresh cached data for {} ({})", symbol, interval);
            return Ok(FetchOutcome::Fresh(cache_file));
        }

        let range = fetch_range(timeframe, Utc::now());
        match timeframe.max_lookback_days() {
            Some(days) => info!(
                "Fetching {} days of history for {} (interval {})",
                days, symbol, interval
            ),
            None => info!(
                "Fetching MAX available history for {} (interval {})",
                symbol, interval
            ),
        }

        let raw = match self.provider.fetch_history(symbol, interval, range).await {
            Ok(raw) if raw.is_empty() => {
                warn!("No data returned for {} ({})", symbol, interval);
                return self.fall_back(
                    cache_file,
                    symbol,
                    AppError::NoData(format!("provider returned nothing for {}", symbol)),
                );
            }
            Ok(raw) => raw,
            Err(ProviderError::NoData) => {
                warn!("No data returned for {} ({})", symbol, interval);
                return self.fall_back(
                    cache_file,
                    symbol,
                    AppError::NoData(format!("provider returned nothing for {}", symbol)),
                );
            }
            Err(ProviderError::InvalidResponse(msg)) => {
                warn!("Malformed response for {}: {}", symbol, msg);
                return self.fall_back(cache_file, symbol, AppError::Transform(msg));
            }
            Err(ProviderError::Http(msg)) => {
                warn!("Fetch failed for {}: {}", symbol, msg);
                return self.fall_back(cache_file, symbol, AppError::Network(msg));
            }
        };

        let mut bars = transform(raw, symbol, timeframe);
        if bars.is_empty() {
            warn!("No complete rows left for {} after cleaning", symbol);
            return self.fall_back(
                cache_file,
                symbol,
                AppError::NoData(format!("no usable rows for {}", symbol)),
            );
        }

        indicators::enrich_bars(&mut bars);

        cache::write_bars(&cache_file, &bars)?;
        info!(
            "Saved {} rows for {} ({}) to {}",
            bars.len(),
            symbol,
            interval,
            cache_file.display()
        );
        Ok(FetchOutcome::Refreshed(cache_file))
    }

    /// Return the existing cache file in place of `err`, or `err` itself
    /// when there is nothing on disk to fall back to.
    fn fall_back(
        &self,
        cache_file: PathBuf,
        symbol: &str,
        err: AppError,
    ) -> Result<FetchOutcome> {
        if cache_file.exists() {
            info!("Keeping potentially stale cache for {}", symbol);
            Ok(FetchOutcome::StaleFallback {
                path: cache_file,
                reason: err.to_string(),
            })
        } else {
            Err(err)
        }
    }
}

/// Fetch window for a timeframe: bounded trailing window for intraday,
/// full available history for daily and coarser.
fn fetch_range(timeframe: Timeframe, now: DateTime<Utc>) -> FetchRange {
    let start = timeframe
        .max_lookback_days()
        .map(|days| now - Duration::days(days));
    FetchRange { start, end: now }
}

/// Clean a raw series into cache-ready bars: drop incomplete rows, tag
/// the symbol, normalize daily-and-coarser timestamps to midnight, sort
/// ascending, and collapse duplicate timestamps keeping the last.
fn transform(raw: Vec<RawBar>, symbol: &str, timeframe: Timeframe) -> Vec<PriceBar> {
    let total = raw.len();
    let mut bars: Vec<PriceBar> = Vec::with_capacity(total);

    for bar in raw {
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (bar.open, bar.high, bar.low, bar.close, bar.volume)
        else {
            continue;
        };
        let date = if timeframe.is_intraday() {
            bar.time
        } else {
            midnight(bar.time)
        };
        bars.push(PriceBar::new(
            date,
            open,
            high,
            low,
            close,
            volume,
            symbol.to_string(),
        ));
    }

    let dropped = total - bars.len();
    if dropped > 0 {
        info!("Removed {} rows with missing values for {}", dropped, symbol);
    }

    // Stable sort keeps provider order among equal timestamps, so
    // keep-last below keeps the provider's latest revision of a bar.
    bars.sort_by_key(|b| b.date);

    let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        if deduped.last().is_some_and(|prev| prev.date == bar.date) {
            let last = deduped.len() - 1;
            deduped[last] = bar;
        } else {
            deduped.push(bar);
        }
    }
    deduped
}

fn midnight(time: DateTime<Utc>) -> DateTime<Utc> {
    time.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc()
}
