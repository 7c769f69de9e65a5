// src/etfdb/models.rs
use serde::{Deserialize, Serialize};

/// Body of one screener API request.
/// Example: `{"tab":"returns","page":1,"per_page":250,"only":["meta","data"]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenerRequest {
    pub tab: &'static str,
    pub page: u32,
    pub per_page: u32,
    pub only: [&'static str; 2],
}

impl ScreenerRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            tab: "returns",
            page,
            per_page,
            only: ["meta", "data"],
        }
    }
}

/// Screener response envelope. Rows stay untyped: upstream drops fields freely
/// and one odd row must not sink the whole page.
#[derive(Debug, Deserialize)]
pub struct ScreenerResponse {
    pub data: Vec<serde_json::Value>,
}

/// One ETF from the screener listing, flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub one_week_return: Option<String>,
    pub one_year_return: Option<String>,
    pub three_year_return: Option<String>,
    pub five_year_return: Option<String>,
}

/// Entry of the symbol catalog file. `etfdb list` output is a valid catalog,
/// so rows whose `symbol` is missing or null are tolerated and skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub symbol: Option<String>,
}
