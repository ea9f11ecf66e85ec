use std::path::PathBuf;

/// Get market data directory from environment variable or use default
pub fn get_market_data_dir() -> PathBuf {
    std::env::var("MARKET_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("market_data"))
}

/// Mangle a symbol into a filesystem-safe cache key.
///
/// FX pairs ("EUR/USD") and Yahoo suffix symbols ("EURUSD=X") carry
/// characters that are awkward in filenames.
pub fn safe_symbol(symbol: &str) -> String {
    symbol.replace('/', "-").replace('=', "_")
}
