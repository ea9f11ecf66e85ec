use crate::services::init_lists::save_default_lists;
use crate::utils::get_market_data_dir;

/// Bootstrap the default symbol and timeframe catalogs.
///
/// A failure is fatal only when initialization was the sole request
/// (`exit_on_failure`); otherwise the fetch that follows still runs.
pub fn run(exit_on_failure: bool) {
    println!("📋 Checking/saving default lists...");
    match save_default_lists(&get_market_data_dir()) {
        Ok(()) => println!("✅ Default lists ready"),
        Err(e) => {
            eprintln!("❌ Failed to initialize default lists: {}", e);
            if exit_on_failure {
                std::process::exit(1);
            }
        }
    }
}
