// src/extractors/mod.rs
//
// One extractor per region of an etfdb.com ETF page. Each takes the parsed
// document by reference, never fails, and returns an empty record when its
// region is missing.
pub mod categories;
pub mod document;
pub mod exposure;
pub mod holdings;
pub mod profile;
pub mod records;
pub mod stats;
pub mod tables;
pub mod technicals;
pub mod valuation;

// Re-export key extraction types for convenience
pub use categories::{asset_categories, classification};
pub use document::ParsedDocument;
pub use exposure::exposure;
pub use holdings::holdings_list;
pub use profile::{basic_info, profile_fields, trading_data};
pub use records::{Exposure, FlatRecord, HoldingEntry, NestedRecord};
pub use stats::{dividends, holdings_count, performance, size_breakdown};
pub use technicals::{technicals, volatility};
pub use valuation::valuation;
