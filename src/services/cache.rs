//! Flat-file CSV cache, one file per (symbol, interval) pair.

use crate::constants::CACHE_HEADER;
use crate::error::{AppError, Result};
use crate::models::PriceBar;
use crate::utils::safe_symbol;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Cache file path for a symbol/interval pair: `{safe}_{interval}_data.csv`.
pub fn cache_file_path(data_dir: &Path, symbol: &str, interval: &str) -> PathBuf {
    data_dir.join(format!("{}_{}_data.csv", safe_symbol(symbol), interval))
}

/// Check whether a cache file exists and is younger than `hours`.
///
/// Unreadable metadata counts as stale, not as an error.
pub fn is_cache_fresh(path: &Path, hours: u64) -> bool {
    if !path.exists() {
        debug!("Cache check: file not found - {}", path.display());
        return false;
    }

    let modified = match path.metadata().and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) => {
            warn!(
                "Could not get modification time for {}: {}",
                path.display(),
                e
            );
            return false;
        }
    };

    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or_default();
    let fresh = age.as_secs() < hours * 3600;
    debug!(
        "Cache check: {} age {}s, fresh: {}",
        path.display(),
        age.as_secs(),
        fresh
    );
    fresh
}

/// Read a cached bar series.
pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for record in reader.deserialize() {
        bars.push(record?);
    }
    Ok(bars)
}

/// Overwrite the cache file with `bars`.
///
/// Writes a `.tmp` sibling and renames it into place, so a failed write
/// never leaves a truncated cache behind.
pub fn write_bars(path: &Path, bars: &[PriceBar]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Save(format!("could not create {}: {}", parent.display(), e)))?;
    }

    let tmp = path.with_extension("csv.tmp");
    let result = write_bars_to(&tmp, bars);
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path)
        .map_err(|e| AppError::Save(format!("could not move cache into place: {}", e)))
}

fn write_bars_to(path: &Path, bars: &[PriceBar]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::Save(format!("could not open {}: {}", path.display(), e)))?;

    writer
        .write_record(CACHE_HEADER)
        .map_err(|e| AppError::Save(format!("could not write header: {}", e)))?;
    for bar in bars {
        writer
            .serialize(bar)
            .map_err(|e| AppError::Save(format!("could not write row: {}", e)))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::Save(format!("could not flush cache file: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_bars(n: usize) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar::new(
                    start + Duration::days(i as i64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1000 + i as u64,
                    "AAPL".to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_cache_file_path_mangles_symbol() {
        let dir = PathBuf::from("market_data");
        assert_eq!(
            cache_file_path(&dir, "AAPL", "1d"),
            dir.join("AAPL_1d_data.csv")
        );
        assert_eq!(
            cache_file_path(&dir, "EURUSD=X", "1h"),
            dir.join("EURUSD_X_1h_data.csv")
        );
    }

    #[test]
    fn test_freshness() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AAPL_1d_data.csv");

        assert!(!is_cache_fresh(&path, 24));

        write_bars(&path, &sample_bars(2)).unwrap();
        assert!(is_cache_fresh(&path, 24));
        // Zero-hour threshold makes every file stale
        assert!(!is_cache_fresh(&path, 0));
    }

    #[test]
    fn test_header_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AAPL_1d_data.csv");
        write_bars(&path, &sample_bars(1)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first_line = content.lines().next().unwrap();
        assert_eq!(first_line, "date,open,high,low,close,volume,symbol,sma20,rsi");
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AAPL_1d_data.csv");
        let mut bars = sample_bars(3);
        bars[2].sma20 = Some(101.0);
        bars[2].rsi = Some(60.0);

        write_bars(&path, &bars).unwrap();
        let read = read_bars(&path).unwrap();

        assert_eq!(read.len(), 3);
        assert_eq!(read[0].sma20, None);
        assert_eq!(read[2].sma20, Some(101.0));
        assert_eq!(read[2].volume, 1002);
        assert_eq!(read[2].date, bars[2].date);
    }

    #[test]
    fn test_write_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AAPL_1d_data.csv");
        write_bars(&path, &sample_bars(1)).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["AAPL_1d_data.csv".to_string()]);
    }
}
