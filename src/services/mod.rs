pub mod cache;
pub mod fetcher;
pub mod init_lists;
pub mod provider;
pub mod yahoo;

pub use fetcher::{FetchOutcome, Fetcher};
pub use provider::{FetchRange, HistoryProvider, ProviderError, RawBar};
pub use yahoo::YahooClient;
