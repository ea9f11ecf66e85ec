//! Tunables for the fetch-and-cache pipeline.

/// Cache files older than this many hours are considered stale.
pub const CACHE_HOURS: u64 = 24;

/// Default for the `--days` argument.
///
/// The value is advisory: callers use it to trim the series they read
/// back from the cache file. The fetch window is determined by the
/// timeframe alone.
pub const DEFAULT_FETCH_DAYS: u32 = 365;

/// Simple moving average window (periods).
pub const SMA_PERIOD: usize = 20;

/// Relative strength index window (periods of close-to-close deltas).
pub const RSI_PERIOD: usize = 14;

/// Neutral RSI value used where the index is undefined.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Stand-in denominator for zero-loss RSI windows.
pub const RSI_ZERO_LOSS_EPSILON: f64 = 1e-10;

/// Yahoo serves at most ~2 years of hourly bars.
pub const HOURLY_LOOKBACK_DAYS: i64 = 730;

/// Column order of every cache file.
pub const CACHE_HEADER: [&str; 9] = [
    "date", "open", "high", "low", "close", "volume", "symbol", "sma20", "rsi",
];

/// Symbol catalog file written by `--init-lists`.
pub const DEFAULT_SYMBOLS_FILE: &str = "default_symbols.csv";

/// Timeframe catalog file written by `--init-lists`.
pub const TIMEFRAMES_FILE: &str = "timeframes.csv";
