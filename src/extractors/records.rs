// src/extractors/records.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label → text, one row per entry, in page order.
pub type FlatRecord = IndexMap<String, String>;

/// Row label → {column label → text}.
pub type NestedRecord = IndexMap<String, FlatRecord>;

/// Chart title → {segment name → first data point}.
pub type ChartBreakdown = IndexMap<String, ChartSegments>;

/// Segment name → first data point of one chart.
pub type ChartSegments = IndexMap<String, serde_json::Value>;

pub const EXPOSURE_NOT_FOUND: &str = "Region, country, sector breakdown data not found";

/// One constituent row of the holdings table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingEntry {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Holding")]
    pub holding: String,
    #[serde(rename = "Share")]
    pub share: String,
    /// Empty when the row carries no link.
    #[serde(rename = "Url")]
    pub url: String,
}

/// Region/country/sector breakdowns, or a placeholder when the page has no charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exposure {
    Charts(ChartBreakdown),
    Missing {
        #[serde(rename = "Data")]
        data: String,
    },
}

impl Exposure {
    pub fn not_found() -> Self {
        Exposure::Missing {
            data: EXPOSURE_NOT_FOUND.to_string(),
        }
    }

    pub fn charts(&self) -> Option<&ChartBreakdown> {
        match self {
            Exposure::Charts(charts) => Some(charts),
            Exposure::Missing { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_exposure_serializes_as_placeholder() {
        let value = serde_json::to_value(Exposure::not_found()).unwrap();
        assert_eq!(value, serde_json::json!({ "Data": EXPOSURE_NOT_FOUND }));
    }

    #[test]
    fn test_holding_entry_uses_site_labels() {
        let entry = HoldingEntry {
            symbol: "MSFT".into(),
            holding: "Microsoft Corp".into(),
            share: "7.09%".into(),
            url: String::new(),
        };
        let value = serde_json::to_value(entry).unwrap();
        assert_eq!(value["Symbol"], "MSFT");
        assert_eq!(value["Url"], "");
    }
}
