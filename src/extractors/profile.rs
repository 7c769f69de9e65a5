// src/extractors/profile.rs
use once_cell::sync::Lazy;
use scraper::Selector;

use crate::extractors::document::{first_child_match, second_child_match, trimmed_text, ParsedDocument};
use crate::extractors::records::FlatRecord;
use crate::extractors::tables::{child_pair, span_pair};

pub const HOME_PAGE_LABEL: &str = "ETF Home Page";

// --- CSS Selectors (Lazy Static) ---
static PROFILE_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.profile-container div.row").expect("Failed to compile PROFILE_ROW_SELECTOR")
});

static TRADING_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.data-trading.bar-charts-table")
        .expect("Failed to compile TRADING_CONTAINER_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR"));

static TICKER_BODY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#etf-ticker-body div.row").expect("Failed to compile TICKER_BODY_ROW_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.row").expect("Failed to compile ROW_SELECTOR"));

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Failed to compile ANCHOR_SELECTOR"));

/// Descriptive fields of the profile container: each row's first two spans.
pub fn profile_fields(doc: &ParsedDocument) -> FlatRecord {
    doc.html().select(&PROFILE_ROW_SELECTOR).filter_map(span_pair).collect()
}

/// 52-week range, AUM, shares and similar; entries with a blank value are dropped.
pub fn trading_data(doc: &ParsedDocument) -> FlatRecord {
    let Some(container) = doc.find(&TRADING_CONTAINER_SELECTOR) else {
        tracing::debug!("Trading data block not present");
        return FlatRecord::new();
    };

    container
        .select(&LIST_ITEM_SELECTOR)
        .filter_map(child_pair)
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

/// Top rows of the ticker body (issuer, brand, inception, ...).
///
/// Linked values become absolute URLs, except the home-page link which is kept
/// as published. Cells without a linked `href` fall back to their text.
pub fn basic_info(doc: &ParsedDocument) -> FlatRecord {
    let mut info = FlatRecord::new();
    let Some(body) = doc.find(&TICKER_BODY_ROW_SELECTOR) else {
        tracing::debug!("Ticker body rows not present");
        return info;
    };

    for row in body.select(&ROW_SELECTOR) {
        let Some(key) = first_child_match(row).map(trimmed_text) else {
            continue;
        };
        let Some(cell) = second_child_match(row) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }

        let href = cell
            .select(&ANCHOR_SELECTOR)
            .next()
            .and_then(|anchor| anchor.value().attr("href"));
        let value = match href {
            Some(href) if !href.is_empty() && key != HOME_PAGE_LABEL => doc.absolute_url(href),
            Some(href) => href.to_string(),
            None => trimmed_text(cell),
        };

        if key == HOME_PAGE_LABEL && value.starts_with(doc.base_url()) {
            // Home page links pointing back at etfdb.com are reported as-is.
            tracing::trace!("Home page link {} points at {}", value, doc.base_url());
        }

        info.insert(key, value);
    }
    info
}
