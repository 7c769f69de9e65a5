// src/profile/mod.rs
pub mod client;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extractors::{
    self, Exposure, FlatRecord, HoldingEntry, NestedRecord, ParsedDocument,
};
use crate::tickers::ResolvedTicker;

pub use client::EtfClient;

pub const ANALYST_REPORT_LABEL: &str = "Analyst Report";

// Keys owned by the nested sections; a flat field with the same label is dropped.
const SECTION_KEYS: [&str; 9] = [
    "Statistics",
    "Allocation",
    "Holdings",
    "Size",
    "Dividends",
    "Performance",
    "Technicals",
    "Volatility",
    "Exposure",
];

/// A top-level profile value: plain text, or a small table (valuation metrics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Table(FlatRecord),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&FlatRecord> {
        match self {
            FieldValue::Table(table) => Some(table),
            FieldValue::Text(_) => None,
        }
    }
}

/// Top-level profile fields in merge order.
pub type ProfileFields = IndexMap<String, FieldValue>;

/// The flat-merged sections, one field per extractor.
///
/// Field order here is not significant; [`FlatSections::merge`] alone fixes
/// precedence, so the sections may be extracted in any order.
#[derive(Debug, Clone, Default)]
pub struct FlatSections {
    pub basics: FlatRecord,
    pub profile: FlatRecord,
    pub valuation: NestedRecord,
    pub trading: FlatRecord,
    pub asset_categories: FlatRecord,
    pub classification: FlatRecord,
}

impl FlatSections {
    pub fn extract(doc: &ParsedDocument) -> Self {
        Self {
            basics: extractors::basic_info(doc),
            profile: extractors::profile_fields(doc),
            valuation: extractors::valuation(doc),
            trading: extractors::trading_data(doc),
            asset_categories: extractors::asset_categories(doc),
            classification: extractors::classification(doc),
        }
    }

    /// Merges onto `seed`: basics, profile container, valuation, trading data,
    /// asset categories, then classification. Later sections overwrite earlier ones.
    pub fn merge(self, seed: FlatRecord) -> ProfileFields {
        let mut fields = ProfileFields::new();
        let text = |record: FlatRecord| record.into_iter().map(|(k, v)| (k, FieldValue::Text(v)));

        fields.extend(text(seed));
        fields.extend(text(self.basics));
        fields.extend(text(self.profile));
        fields.extend(
            self.valuation
                .into_iter()
                .map(|(metric, columns)| (metric, FieldValue::Table(columns))),
        );
        fields.extend(text(self.trading));
        fields.extend(text(self.asset_categories));
        fields.extend(text(self.classification));
        fields
    }
}

/// Everything etfdb.com publishes about one ETF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfProfile {
    #[serde(flatten)]
    pub fields: ProfileFields,
    #[serde(rename = "Statistics")]
    pub statistics: NestedRecord,
    #[serde(rename = "Allocation")]
    pub allocation: FlatRecord,
    #[serde(rename = "Holdings")]
    pub holdings: Vec<HoldingEntry>,
    #[serde(rename = "Size")]
    pub size: NestedRecord,
    #[serde(rename = "Dividends")]
    pub dividends: NestedRecord,
    #[serde(rename = "Performance")]
    pub performance: NestedRecord,
    #[serde(rename = "Technicals")]
    pub technicals: FlatRecord,
    #[serde(rename = "Volatility")]
    pub volatility: FlatRecord,
    #[serde(rename = "Exposure")]
    pub exposure: Exposure,
}

impl EtfProfile {
    pub fn symbol(&self) -> Option<&str> {
        self.field("Symbol")
    }

    pub fn url(&self) -> Option<&str> {
        self.field("Url")
    }

    /// Text value of a top-level field.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.get(label).and_then(FieldValue::as_text)
    }
}

/// Holdings statistics, asset allocation and constituents together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingsSection {
    #[serde(rename = "Statistics")]
    pub statistics: NestedRecord,
    #[serde(rename = "Allocation")]
    pub allocation: FlatRecord,
    #[serde(rename = "Holdings")]
    pub holdings: Vec<HoldingEntry>,
}

impl HoldingsSection {
    pub fn extract(doc: &ParsedDocument) -> Self {
        Self {
            statistics: extractors::holdings_count(doc),
            allocation: extractors::asset_categories(doc),
            holdings: extractors::holdings_list(doc),
        }
    }
}

/// `Symbol`/`Url` every profile starts from.
fn ticker_seed(ticker: &ResolvedTicker) -> FlatRecord {
    FlatRecord::from([
        ("Symbol".to_string(), ticker.symbol.clone()),
        ("Url".to_string(), ticker.url.clone()),
    ])
}

/// Ticker fields plus the flat-merged sections, without the analyst report.
pub fn merged_fields(sections: FlatSections, ticker: &ResolvedTicker) -> ProfileFields {
    let mut fields = sections.merge(ticker_seed(ticker));
    fields.shift_remove(ANALYST_REPORT_LABEL);
    fields
}

/// Runs every extractor over `doc` and assembles the profile of `ticker`.
pub fn assemble(doc: &ParsedDocument, ticker: &ResolvedTicker) -> EtfProfile {
    let HoldingsSection {
        statistics,
        allocation,
        holdings,
    } = HoldingsSection::extract(doc);

    let mut fields = merged_fields(FlatSections::extract(doc), ticker);
    for key in SECTION_KEYS {
        if fields.shift_remove(key).is_some() {
            tracing::debug!("Dropping flat field {:?} shadowed by its section", key);
        }
    }

    let profile = EtfProfile {
        fields,
        statistics,
        allocation,
        holdings,
        size: extractors::size_breakdown(doc),
        dividends: extractors::dividends(doc),
        performance: extractors::performance(doc),
        technicals: extractors::technicals(doc),
        volatility: extractors::volatility(doc),
        exposure: extractors::exposure(doc),
    };

    tracing::info!(
        "Assembled profile for {}: {} fields, {} holdings",
        ticker.symbol,
        profile.fields.len(),
        profile.holdings.len()
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/spy_profile.html"
    ));

    fn spy() -> ResolvedTicker {
        ResolvedTicker {
            symbol: "SPY".to_string(),
            url: "https://etfdb.com/etf/SPY".to_string(),
        }
    }

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_merge_precedence_is_fixed() {
        let sections = FlatSections {
            basics: record(&[("Symbol", "basics"), ("A", "basics"), ("B", "basics")]),
            profile: record(&[("A", "profile"), ("C", "profile")]),
            valuation: NestedRecord::from([("C".to_string(), record(&[("SPY", "1.0")]))]),
            trading: record(&[("C", "trading"), ("D", "trading")]),
            asset_categories: record(&[("D", "assets"), ("E", "assets")]),
            classification: record(&[("E", "classification"), ("B", "classification")]),
        };
        let fields = sections.merge(record(&[("Symbol", "SPY"), ("Url", "u")]));

        assert_eq!(fields["Symbol"], FieldValue::Text("basics".into()));
        assert_eq!(fields["Url"], FieldValue::Text("u".into()));
        assert_eq!(fields["A"], FieldValue::Text("profile".into()));
        assert_eq!(fields["B"], FieldValue::Text("classification".into()));
        assert_eq!(fields["C"], FieldValue::Text("trading".into()));
        assert_eq!(fields["D"], FieldValue::Text("assets".into()));
        assert_eq!(fields["E"], FieldValue::Text("classification".into()));
    }

    #[test]
    fn test_valuation_overrides_profile_and_loses_to_trading() {
        let sections = FlatSections {
            profile: record(&[("P/E Ratio", "text")]),
            valuation: NestedRecord::from([
                ("P/E Ratio".to_string(), record(&[("SPY", "24.9")])),
                ("P/B Ratio".to_string(), record(&[("SPY", "4.6")])),
            ]),
            trading: record(&[("P/B Ratio", "trading")]),
            ..Default::default()
        };
        let fields = sections.merge(FlatRecord::new());

        assert_eq!(fields["P/E Ratio"].as_table().unwrap()["SPY"], "24.9");
        assert_eq!(fields["P/B Ratio"].as_text(), Some("trading"));
    }

    #[test]
    fn test_analyst_report_is_removed() {
        let sections = FlatSections {
            basics: record(&[("Analyst Report", "x"), ("Brand", "SPDR")]),
            ..Default::default()
        };
        let fields = merged_fields(sections, &spy());

        assert!(!fields.contains_key(ANALYST_REPORT_LABEL));
        assert_eq!(fields["Brand"].as_text(), Some("SPDR"));
        assert_eq!(fields["Symbol"].as_text(), Some("SPY"));
        assert_eq!(fields["Url"].as_text(), Some("https://etfdb.com/etf/SPY"));
    }

    #[test]
    fn test_empty_document_still_has_symbol_and_url() {
        let doc = ParsedDocument::parse("<html><body></body></html>", "https://etfdb.com");
        let profile = assemble(&doc, &spy());

        assert_eq!(profile.symbol(), Some("SPY"));
        assert_eq!(profile.url(), Some("https://etfdb.com/etf/SPY"));
        assert!(profile.holdings.is_empty());
        assert_eq!(profile.exposure, Exposure::not_found());
    }

    #[test]
    fn test_fixture_profile() {
        let doc = ParsedDocument::parse(FIXTURE, "https://etfdb.com");
        let profile = assemble(&doc, &spy());

        // Basics, with links resolved
        assert_eq!(profile.field("Issuer"), Some("https://etfdb.com/issuer/state-street/"));
        assert_eq!(profile.field("Brand"), Some("SPDR"));
        assert_eq!(profile.field("Index Tracked"), Some("https://etfdb.com/index/sp-500/"));
        assert_eq!(
            profile.field("ETF Home Page"),
            Some("https://www.ssga.com/us/en/individual/etfs/spy")
        );
        assert!(!profile.fields.contains_key(ANALYST_REPORT_LABEL));

        // Precedence: profile container over basics, classification over basics
        assert_eq!(profile.field("Structure"), Some("Unit Investment Trust"));
        assert_eq!(profile.field("Category"), Some("Large Cap Blend Equities"));

        // Trading data without the blank AUM
        assert_eq!(profile.field("52 Week Hi"), Some("$524.61"));
        assert!(!profile.fields.contains_key("AUM"));

        // Valuation is merged as a table
        let pe = profile.fields["P/E Ratio"].as_table().unwrap();
        assert_eq!(pe["SPY"], "24.91");
        assert_eq!(pe["ETF Database Category Average"], "22.18");

        // Asset categories appear flat and as the allocation section
        assert_eq!(profile.field("Asset Class"), Some("Equity"));
        assert_eq!(profile.allocation["Region (General)"], "North America");

        assert_eq!(profile.statistics["Number of Holdings"]["SPY"], "504");
        assert_eq!(profile.size["Large (>12.9B)"]["Category Avg"], "72.10%");
        assert_eq!(profile.dividends["Dividend"]["SPY"], "$1.59");
        assert_eq!(profile.performance["1 Year Return"]["Category Avg"], "25.01%");
        assert_eq!(profile.technicals["20 Day MA"], "$508.21");
        assert_eq!(profile.technicals.len(), 3);
        assert_eq!(profile.volatility["20 Day Volatility"], "12.30%");

        assert_eq!(profile.holdings.len(), 3);
        assert_eq!(profile.holdings[0].symbol, "MSFT");
        assert_eq!(profile.holdings[0].url, "https://etfdb.com/stock/MSFT/");
        assert_eq!(profile.holdings[2].url, "");

        let charts = profile.exposure.charts().unwrap();
        assert_eq!(charts["Sector Breakdown"]["Technology"], serde_json::json!(29.5));
    }

    #[test]
    fn test_fields_serialize_in_merge_order() {
        let doc = ParsedDocument::parse(FIXTURE, "https://etfdb.com");
        let json = serde_json::to_string(&assemble(&doc, &spy())).unwrap();
        let position = |key: &str| json.find(&format!("\"{}\":", key)).unwrap();

        // Ticker seed first, then basics in page order (Issuer precedes Brand)
        assert!(position("Symbol") < position("Url"));
        assert!(position("Url") < position("Issuer"));
        assert!(position("Issuer") < position("Brand"));
        assert!(position("Brand") < position("Expense Ratio"));
    }

    #[test]
    fn test_profile_serializes_flat_fields_beside_sections() {
        let doc = ParsedDocument::parse(FIXTURE, "https://etfdb.com");
        let value = serde_json::to_value(assemble(&doc, &spy())).unwrap();

        assert_eq!(value["Symbol"], "SPY");
        assert_eq!(value["Brand"], "SPDR");
        assert_eq!(value["P/E Ratio"]["SPY"], "24.91");
        assert_eq!(value["Holdings"][1]["Symbol"], "AAPL");
        assert_eq!(value["Statistics"]["Number of Holdings"]["Category Avg"], "398");
        assert!(value.get("Analyst Report").is_none());
    }
}
