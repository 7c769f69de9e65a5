// src/extractors/valuation.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use crate::extractors::document::{class_matches, trimmed_text, ParsedDocument};
use crate::extractors::records::NestedRecord;

static VALUATION_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#etf-ticker-valuation-dividend_tab div#valuation div.row")
        .expect("Failed to compile VALUATION_ROW_SELECTOR")
});

static DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("Failed to compile DIV_SELECTOR"));

static TEXT_CENTER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.text-center").expect("Failed to compile TEXT_CENTER_SELECTOR"));

// Column headings ("SPY", "ETF Database Category Average", ...) carry `h4 center...` classes.
static COLUMN_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"h4 center*").expect("Failed to compile COLUMN_CLASS_RE"));

/// Valuation metrics as `metric → {column: value}`.
///
/// The second row of the valuation block holds the column headings followed by
/// `text-center` cells in `(metric, value)` pairs, one pair per column.
pub fn valuation(doc: &ParsedDocument) -> NestedRecord {
    let mut results = NestedRecord::new();
    let Some(row) = doc.html().select(&VALUATION_ROW_SELECTOR).nth(1) else {
        tracing::debug!("Valuation block not present");
        return results;
    };

    let columns: Vec<String> = row
        .select(&DIV_SELECTOR)
        .filter(|div| class_matches(*div, &COLUMN_CLASS_RE))
        .map(trimmed_text)
        .collect();
    let cells: Vec<String> = row.select(&TEXT_CENTER_SELECTOR).map(trimmed_text).collect();

    for (column, pair) in columns.iter().zip(cells.chunks(2)) {
        let [metric, value] = pair else {
            tracing::debug!("Dangling valuation cell {:?} for column {}", pair, column);
            continue;
        };
        results
            .entry(metric.clone())
            .or_default()
            .insert(column.clone(), value.clone());
    }
    results
}
