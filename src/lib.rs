// src/lib.rs
pub mod etfdb;
pub mod extractors;
pub mod listing;
pub mod profile;
pub mod storage;
pub mod tickers;
pub mod utils;

// Re-export the entry points for convenience
pub use listing::ListingScraper;
pub use profile::{EtfClient, EtfProfile};
pub use tickers::SymbolCatalog;
pub use utils::error::EtfdbError;
pub use utils::EtfdbConfig;
