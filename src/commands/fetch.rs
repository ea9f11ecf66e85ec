use crate::error::{AppError, Result};
use crate::models::Timeframe;
use crate::services::{FetchOutcome, Fetcher, YahooClient};
use crate::utils::get_market_data_dir;

/// Run the fetch command for one symbol.
///
/// `days` is advisory: callers use it to trim the series they read back
/// from the cache file; the fetch window is determined by the timeframe.
pub fn run(symbol: String, timeframe_token: String, days: u32) {
    let timeframe = Timeframe::resolve(&timeframe_token);
    println!(
        "📈 Fetching {} ({}, advisory window {} periods)...",
        symbol,
        timeframe.interval(),
        days
    );

    match run_fetch(&symbol, timeframe) {
        Ok(FetchOutcome::Fresh(path)) => {
            println!("✅ Using fresh cache: {}", path.display());
        }
        Ok(FetchOutcome::Refreshed(path)) => {
            println!("✅ Cache refreshed: {}", path.display());
        }
        Ok(FetchOutcome::StaleFallback { path, reason }) => {
            println!("⚠️  Refresh failed ({}), using stale cache: {}", reason, path.display());
        }
        Err(e) => {
            eprintln!("❌ Fetch failed for {}: {}", symbol, e);
            std::process::exit(1);
        }
    }
}

fn run_fetch(symbol: &str, timeframe: Timeframe) -> Result<FetchOutcome> {
    // Create Tokio runtime for the one-shot async fetch
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Io(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let provider = YahooClient::new().map_err(|e| AppError::Network(e.to_string()))?;
        let fetcher = Fetcher::new(provider, get_market_data_dir());
        fetcher.fetch(symbol, timeframe).await
    })
}
