// src/extractors/categories.rs
use once_cell::sync::Lazy;
use scraper::Selector;

use crate::extractors::document::ParsedDocument;
use crate::extractors::records::FlatRecord;
use crate::extractors::tables::pair_rows;

static TICKER_ASSETS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#etf-ticker-body div.ticker-assets")
        .expect("Failed to compile TICKER_ASSETS_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.row").expect("Failed to compile ROW_SELECTOR"));

static CLASSIFICATION_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#factset-classification tr")
        .expect("Failed to compile CLASSIFICATION_ROW_SELECTOR")
});

/// Asset class, size, style and region rows of the second `ticker-assets` block.
/// The first block is the fund's theme summary and is not read.
pub fn asset_categories(doc: &ParsedDocument) -> FlatRecord {
    match doc.html().select(&TICKER_ASSETS_SELECTOR).nth(1) {
        Some(block) => pair_rows(block.select(&ROW_SELECTOR)),
        None => {
            tracing::debug!("Second ticker-assets block not present");
            FlatRecord::new()
        }
    }
}

/// FactSet classification table (category, focus, niche, ...).
pub fn classification(doc: &ParsedDocument) -> FlatRecord {
    pair_rows(doc.html().select(&CLASSIFICATION_ROW_SELECTOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://etfdb.com";

    #[test]
    fn test_asset_categories_reads_second_block() {
        let doc = ParsedDocument::parse(
            r#"<div id="etf-ticker-body">
                 <div class="ticker-assets"><div class="row"><span>Theme</span><span>ignored</span></div></div>
                 <div class="ticker-assets">
                   <div class="row"><span>Asset Class</span><span>Equity</span></div>
                   <div class="row"><span>Asset Class Size</span><span><a href="/x">Large-Cap</a></span></div>
                   <div class="row"><span>Broken</span></div>
                 </div>
               </div>"#,
            BASE,
        );
        let categories = asset_categories(&doc);

        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Asset Class"], "Equity");
        assert_eq!(categories["Asset Class Size"], "Large-Cap");
        assert!(!categories.contains_key("Theme"));
    }

    #[test]
    fn test_single_assets_block_is_empty() {
        let doc = ParsedDocument::parse(
            r#"<div id="etf-ticker-body"><div class="ticker-assets"><div class="row"><span>A</span><span>B</span></div></div></div>"#,
            BASE,
        );
        assert!(asset_categories(&doc).is_empty());
    }

    #[test]
    fn test_classification_rows() {
        let doc = ParsedDocument::parse(
            r#"<div id="factset-classification"><table>
                 <tr><td>Category</td><td>Large Cap Growth Equities</td></tr>
                 <tr><td>Focus</td><td><a href="/etfs/focus/">Large Cap</a></td></tr>
                 <tr><td>Niche</td></tr>
               </table></div>"#,
            BASE,
        );
        let factset = classification(&doc);

        assert_eq!(factset.len(), 2);
        assert_eq!(factset["Category"], "Large Cap Growth Equities");
        assert_eq!(factset["Focus"], "Large Cap");
    }

    #[test]
    fn test_classification_absent() {
        let doc = ParsedDocument::parse("<div></div>", BASE);
        assert!(classification(&doc).is_empty());
    }
}
