mod bar;
mod symbol_list;
mod timeframe;
pub mod indicators;

pub use bar::PriceBar;
pub use symbol_list::{SymbolEntry, DEFAULT_SYMBOLS};
pub use timeframe::Timeframe;
