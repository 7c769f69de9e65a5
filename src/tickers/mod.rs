// src/tickers/mod.rs
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::etfdb::models::CatalogEntry;
use crate::utils::error::{CatalogError, EtfdbError};

pub const DEFAULT_CATALOG_PATH: &str = "data/etfs_list.json";

static PROCESS_CATALOG: OnceCell<Arc<SymbolCatalog>> = OnceCell::new();

/// Read-only set of the ETF symbols etfdb.com knows about.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    symbols: HashSet<String>,
}

/// A ticker that passed validation, with its canonical detail-page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTicker {
    pub symbol: String,
    pub url: String,
}

impl ResolvedTicker {
    /// URL the profile document is actually fetched from.
    pub fn document_url(&self) -> String {
        format!("{}/", self.url)
    }
}

impl SymbolCatalog {
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: symbols
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Parses a JSON array of objects with a `symbol` field, such as the
    /// bundled catalog or a saved `etfdb list` listing.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_symbols(entries.iter().filter_map(|e| e.symbol.as_deref())))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!("Loaded {} ETF symbols from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Process-wide catalog, read from `path` on first access and kept for the
    /// lifetime of the process. Later calls ignore `path`.
    pub fn global<P: AsRef<Path>>(path: P) -> Result<Arc<SymbolCatalog>, CatalogError> {
        PROCESS_CATALOG
            .get_or_try_init(|| Self::from_path(path).map(Arc::new))
            .map(Arc::clone)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.symbols.contains(&ticker.trim().to_uppercase())
    }

    /// Validates `ticker` case-insensitively and builds its detail URL under `base_url`.
    pub fn resolve(&self, ticker: &str, base_url: &str) -> Result<ResolvedTicker, EtfdbError> {
        let symbol = ticker.trim().to_uppercase();
        if !self.symbols.contains(&symbol) {
            return Err(EtfdbError::InvalidTicker(ticker.to_string()));
        }
        let url = format!("{}/etf/{}", base_url.trim_end_matches('/'), symbol);
        Ok(ResolvedTicker { symbol, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://etfdb.com";

    fn catalog() -> SymbolCatalog {
        SymbolCatalog::from_json_str(
            r#"[{"symbol": "SPY", "name": "SPDR S&P 500"}, {"symbol": "qqq"}, {"symbol": "VTI"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_known_ticker_any_case_resolves_uppercase() {
        let catalog = catalog();
        for input in ["spy", "SPY", "Spy", " sPy "] {
            let resolved = catalog.resolve(input, BASE).unwrap();
            assert_eq!(resolved.symbol, "SPY");
            assert_eq!(resolved.url, "https://etfdb.com/etf/SPY");
            assert_eq!(resolved.document_url(), "https://etfdb.com/etf/SPY/");
        }
        // Catalog entries are normalized too
        assert_eq!(catalog.resolve("QQQ", BASE).unwrap().symbol, "QQQ");
    }

    #[test]
    fn test_unknown_ticker_is_invalid() {
        let catalog = catalog();
        for input in ["ZZZZ", "", "SP"] {
            match catalog.resolve(input, BASE) {
                Err(EtfdbError::InvalidTicker(t)) => assert_eq!(t, input),
                other => panic!("expected InvalidTicker for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_entries_without_symbol_are_skipped() {
        let catalog =
            SymbolCatalog::from_json_str(r#"[{"name": "nothing"}, {"symbol": null}, {"symbol": "DIA"}]"#)
                .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("dia"));
    }

    #[test]
    fn test_non_array_catalog_is_rejected() {
        let err = SymbolCatalog::from_json_str(r#"{"symbol": "SPY"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Format(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SymbolCatalog::from_path("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/etfs_list.json");
        let catalog = SymbolCatalog::from_path(path).unwrap();
        assert!(catalog.contains("spy"));
        assert!(!catalog.is_empty());
    }
}
