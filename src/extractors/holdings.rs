// src/extractors/holdings.rs
use once_cell::sync::Lazy;
use scraper::Selector;

use crate::extractors::document::{trimmed_text, ParsedDocument};
use crate::extractors::records::HoldingEntry;

static HOLDINGS_BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#holding_section tbody").expect("Failed to compile HOLDINGS_BODY_SELECTOR")
});

static TR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile TR_SELECTOR"));
static TD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile TD_SELECTOR"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Failed to compile ANCHOR_SELECTOR"));

/// Constituents from the holdings section, in page order.
///
/// Returns an empty list when the section or its table body is missing.
pub fn holdings_list(doc: &ParsedDocument) -> Vec<HoldingEntry> {
    let Some(tbody) = doc.find(&HOLDINGS_BODY_SELECTOR) else {
        tracing::debug!("Holdings section not present");
        return Vec::new();
    };

    tbody
        .select(&TR_SELECTOR)
        .map(|row| {
            let cells: Vec<String> = row.select(&TD_SELECTOR).map(trimmed_text).collect();
            let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
            let url = row
                .select(&ANCHOR_SELECTOR)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .map(|href| doc.absolute_url(href))
                .unwrap_or_default();

            HoldingEntry {
                symbol: cell(0),
                holding: cell(1),
                share: cell(2),
                url,
            }
        })
        .collect()
}
