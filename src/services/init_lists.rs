//! Idempotent bootstrap of the default symbol and timeframe catalogs.

use crate::constants::{DEFAULT_SYMBOLS_FILE, TIMEFRAMES_FILE};
use crate::error::Result;
use crate::models::{Timeframe, DEFAULT_SYMBOLS};
use std::path::Path;
use tracing::{debug, info, warn};

/// Write the default catalogs into `data_dir`, skipping files that
/// already exist. A per-file write failure is a warning, not an error;
/// only failure to create the data directory itself is fatal.
pub fn save_default_lists(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let symbols_file = data_dir.join(DEFAULT_SYMBOLS_FILE);
    if symbols_file.exists() {
        debug!("Default symbols file already exists");
    } else {
        match write_symbol_catalog(&symbols_file) {
            Ok(()) => info!("Saved default symbols to {}", symbols_file.display()),
            Err(e) => warn!("Could not save default symbols: {}", e),
        }
    }

    let timeframes_file = data_dir.join(TIMEFRAMES_FILE);
    if timeframes_file.exists() {
        debug!("Timeframes file already exists");
    } else {
        match write_timeframe_catalog(&timeframes_file) {
            Ok(()) => info!("Saved available timeframes to {}", timeframes_file.display()),
            Err(e) => warn!("Could not save timeframes: {}", e),
        }
    }

    Ok(())
}

fn write_symbol_catalog(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for entry in DEFAULT_SYMBOLS {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_timeframe_catalog(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "name", "interval"])?;
    for tf in Timeframe::all() {
        writer.write_record([tf.id(), tf.display_name(), tf.interval()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_creates_both_catalogs() {
        let dir = TempDir::new().unwrap();
        save_default_lists(dir.path()).unwrap();

        let symbols = fs::read_to_string(dir.path().join(DEFAULT_SYMBOLS_FILE)).unwrap();
        assert!(symbols.starts_with("symbol,name,type\n"));
        assert!(symbols.contains("AAPL,Apple Inc.,stock"));
        assert!(symbols.contains("EURUSD=X,EUR/USD,forex"));

        let timeframes = fs::read_to_string(dir.path().join(TIMEFRAMES_FILE)).unwrap();
        assert!(timeframes.starts_with("id,name,interval\n"));
        assert!(timeframes.contains("1wk,1 Week,1wk"));
    }

    #[test]
    fn test_second_run_never_overwrites() {
        let dir = TempDir::new().unwrap();
        save_default_lists(dir.path()).unwrap();

        let symbols_file = dir.path().join(DEFAULT_SYMBOLS_FILE);
        fs::write(&symbols_file, "symbol,name,type\nCUSTOM,Mine,stock\n").unwrap();

        save_default_lists(dir.path()).unwrap();
        let content = fs::read_to_string(&symbols_file).unwrap();
        assert_eq!(content, "symbol,name,type\nCUSTOM,Mine,stock\n");
    }
}
