use clap::Parser;
use tracing::debug;

use crate::commands;
use crate::constants::DEFAULT_FETCH_DAYS;
use crate::error::AppError;

/// Fetch Yahoo Finance market data and cache it
#[derive(Parser)]
#[command(name = "marketcache")]
#[command(about = "Fetch Yahoo Finance market data and cache it", long_about = None)]
pub struct Cli {
    /// Trading symbol (e.g., AAPL)
    #[arg(long)]
    pub symbol: Option<String>,

    /// Timeframe ID (e.g., 1h, 1d, 1wk, 1mo)
    #[arg(long, default_value = "1d")]
    pub timeframe: String,

    /// Number of past periods; used by callers to limit the result,
    /// fetch duration is determined by the timeframe
    #[arg(long, default_value_t = DEFAULT_FETCH_DAYS)]
    pub days: u32,

    /// Initialize default symbol/timeframe lists and exit if no symbol
    /// is provided
    #[arg(long)]
    pub init_lists: bool,
}

pub fn run() {
    let cli = Cli::parse();
    debug!(
        "Parsed arguments: symbol={:?} timeframe={} days={} init_lists={}",
        cli.symbol, cli.timeframe, cli.days, cli.init_lists
    );

    if cli.init_lists {
        commands::init_lists::run(cli.symbol.is_none());
        if cli.symbol.is_none() {
            std::process::exit(0);
        }
    }

    let Some(symbol) = cli.symbol else {
        let err = AppError::InvalidInput(
            "--symbol is required when not using --init-lists exclusively".to_string(),
        );
        eprintln!("❌ {}", err);
        std::process::exit(2);
    };

    commands::fetch::run(symbol, cli.timeframe, cli.days);
}
