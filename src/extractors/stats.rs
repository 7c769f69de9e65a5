// src/extractors/stats.rs
//
// Fund-versus-category comparison blocks. They all share the same
// "row label → {column: value}" shape and differ only in id and markup.
use crate::extractors::document::ParsedDocument;
use crate::extractors::records::NestedRecord;
use crate::extractors::tables::{stats_table, TableLayout};

pub const HOLDINGS_TABLE_ID: &str = "holdings-table";
pub const SIZE_TABLE_ID: &str = "size-table";
pub const DIVIDEND_TABLE_ID: &str = "dividend-table";
pub const PERFORMANCE_BLOCK_ID: &str = "performance-collapse";

/// Number of holdings and concentration in the top ten.
pub fn holdings_count(doc: &ParsedDocument) -> NestedRecord {
    stats_table(doc, HOLDINGS_TABLE_ID, TableLayout::Table)
}

/// Market-cap size breakdown.
pub fn size_breakdown(doc: &ParsedDocument) -> NestedRecord {
    stats_table(doc, SIZE_TABLE_ID, TableLayout::Table)
}

pub fn dividends(doc: &ParsedDocument) -> NestedRecord {
    stats_table(doc, DIVIDEND_TABLE_ID, TableLayout::Divs)
}

pub fn performance(doc: &ParsedDocument) -> NestedRecord {
    stats_table(doc, PERFORMANCE_BLOCK_ID, TableLayout::Divs)
}
