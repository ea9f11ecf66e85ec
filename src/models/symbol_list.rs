//! Default symbol catalog.
//!
//! Seed list written by `--init-lists`: the equities, indices, and FX
//! pairs offered out of the box before a user maintains their own file.

use serde::Serialize;

/// One entry of the symbol catalog
#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    /// Provider symbol (ticker, index code, or FX pair code)
    pub symbol: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Instrument kind: stock, index, or forex
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Symbols seeded on first run
pub const DEFAULT_SYMBOLS: &[SymbolEntry] = &[
    SymbolEntry { symbol: "AAPL", name: "Apple Inc.", kind: "stock" },
    SymbolEntry { symbol: "MSFT", name: "Microsoft Corporation", kind: "stock" },
    SymbolEntry { symbol: "GOOGL", name: "Alphabet Inc. (Class A)", kind: "stock" },
    SymbolEntry { symbol: "AMZN", name: "Amazon.com, Inc.", kind: "stock" },
    SymbolEntry { symbol: "TSLA", name: "Tesla, Inc.", kind: "stock" },
    SymbolEntry { symbol: "NVDA", name: "NVIDIA Corporation", kind: "stock" },
    SymbolEntry { symbol: "^GSPC", name: "S&P 500", kind: "index" },
    SymbolEntry { symbol: "^DJI", name: "Dow Jones Industrial Average", kind: "index" },
    SymbolEntry { symbol: "^IXIC", name: "NASDAQ Composite", kind: "index" },
    SymbolEntry { symbol: "EURUSD=X", name: "EUR/USD", kind: "forex" },
    SymbolEntry { symbol: "GBPUSD=X", name: "GBP/USD", kind: "forex" },
    SymbolEntry { symbol: "JPY=X", name: "USD/JPY", kind: "forex" },
];
