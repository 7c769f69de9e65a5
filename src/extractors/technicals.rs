// src/extractors/technicals.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{class_matches, raw_text, ParsedDocument};
use crate::extractors::records::FlatRecord;

// Volatility rows separate label and value with exactly this run of blank lines.
const VOLATILITY_DELIMITER: &str = "\n\n\n\n";

static TECHNICALS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#technicals-collapse").expect("Failed to compile TECHNICALS_SELECTOR")
});

static LIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.list-unstyled").expect("Failed to compile LIST_SELECTOR"));

static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR"));

static DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("Failed to compile DIV_SELECTOR"));

static RELATIVE_METRIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("row relative-metric").expect("Failed to compile RELATIVE_METRIC_RE"));

/// Moving averages, RSI, support/resistance and friends.
///
/// Every list item reads as "label\nvalue"; items that don't split into exactly
/// two lines are logged and skipped without affecting the others.
pub fn technicals(doc: &ParsedDocument) -> FlatRecord {
    let mut results = FlatRecord::new();
    let Some(block) = doc.find(&TECHNICALS_SELECTOR) else {
        tracing::debug!("Technicals block not present");
        return results;
    };

    for (index, section) in block.select(&LIST_SELECTOR).enumerate() {
        for item in section.select(&LIST_ITEM_SELECTOR) {
            match line_pair(item) {
                Some((label, value)) => {
                    results.insert(label, value);
                }
                None => tracing::error!(
                    "Skipping technicals item in list {}: {:?}",
                    index,
                    raw_text(item).trim()
                ),
            }
        }
    }
    results
}

fn line_pair(item: ElementRef<'_>) -> Option<(String, String)> {
    let text = raw_text(item);
    let lines: Vec<&str> = text
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    match lines.as_slice() {
        [label, value] => Some((label.to_string(), value.to_string())),
        _ => None,
    }
}

/// Volatility and beta comparisons from the `relative-metric` rows of the technicals block.
pub fn volatility(doc: &ParsedDocument) -> FlatRecord {
    let mut results = FlatRecord::new();
    let Some(block) = doc.find(&TECHNICALS_SELECTOR) else {
        tracing::debug!("Technicals block not present, no volatility metrics");
        return results;
    };

    for metric in block
        .select(&DIV_SELECTOR)
        .filter(|div| class_matches(*div, &RELATIVE_METRIC_RE))
    {
        let text = raw_text(metric);
        let parts: Vec<&str> = text.trim().split(VOLATILITY_DELIMITER).collect();
        match parts.as_slice() {
            [label, value] => {
                results.insert(label.trim().to_string(), value.trim().to_string());
            }
            _ => tracing::warn!("Unexpected volatility row layout: {:?}", text.trim()),
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://etfdb.com";

    #[test]
    fn test_technicals_keep_good_items() {
        let doc = ParsedDocument::parse(
            "<div id=\"technicals-collapse\">\
             <ul class=\"list-unstyled\">\
             <li><span>20 Day MA</span>\n<span>$508.21</span></li>\
             <li><span>Broken</span></li>\
             </ul>\
             <ul class=\"list-unstyled\">\
             <li>\n  <span>RSI</span>\n  <span>58</span>\n</li>\
             <li><span>a</span>\n<span>b</span>\n<span>c</span></li>\
             </ul></div>",
            BASE,
        );
        let indicators = technicals(&doc);

        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators["20 Day MA"], "$508.21");
        assert_eq!(indicators["RSI"], "58");
    }

    #[test]
    fn test_volatility_splits_on_blank_lines() {
        let doc = ParsedDocument::parse(
            "<div id=\"technicals-collapse\">\
             <div class=\"row relative-metric\">\n<div>20 Day Volatility</div>\n\n\n\n<div>12.30%</div>\n</div>\
             <div class=\"row relative-metric\">\n<div>Beta</div>\n<div>1.00</div>\n</div>\
             </div>",
            BASE,
        );
        let metrics = volatility(&doc);

        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics["20 Day Volatility"], "12.30%");
    }

    #[test]
    fn test_absent_block() {
        let doc = ParsedDocument::parse("<div id=\"technicals\"></div>", BASE);
        assert!(technicals(&doc).is_empty());
        assert!(volatility(&doc).is_empty());
    }
}
