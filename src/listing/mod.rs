// src/listing/mod.rs
//
// Bulk ETF listing from the etfdb.com screener API, one page at a time.
use futures::stream::{self, Stream};
use serde_json::Value;

use crate::etfdb::models::ScreenerResponse;
use crate::etfdb::{CatalogRecord, HttpTransport, ScreenerRequest, Transport};
use crate::utils::config::EtfdbConfig;
use crate::utils::error::EtfdbError;

pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// Pages through the screener and flattens its rows into [`CatalogRecord`]s.
pub struct ListingScraper<T = HttpTransport> {
    transport: T,
    config: EtfdbConfig,
}

impl ListingScraper<HttpTransport> {
    pub fn new(config: EtfdbConfig) -> Result<Self, EtfdbError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> ListingScraper<T> {
    pub fn with_transport(transport: T, config: EtfdbConfig) -> Self {
        Self { transport, config }
    }

    /// Raw `data` rows of one screener page (pages start at 1).
    pub async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Value>, EtfdbError> {
        let url = self.config.screener_url();
        let request = ScreenerRequest::new(page, page_size);

        let raw = self.transport.post_page(&url, &request).await.map_err(|e| {
            tracing::error!("Screener page {} request failed: {}", page, e);
            e
        })?;

        let response: ScreenerResponse = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Screener page {} is not a data envelope: {}", page, e);
            e
        })?;

        tracing::info!("Fetched screener page {} ({} rows)", page, response.data.len());
        Ok(response.data)
    }

    /// Lazy page sequence starting at page 1.
    pub fn pages(&self, page_size: u32) -> EtfPages<'_, T> {
        EtfPages {
            scraper: self,
            page_size,
            next: Some(1),
        }
    }

    /// Every page concatenated, in page order. Fails with the first page failure.
    pub async fn all_etfs(&self, page_size: u32) -> Result<Vec<CatalogRecord>, EtfdbError> {
        let mut pages = self.pages(page_size);
        let mut records = Vec::new();
        while let Some(page) = pages.next_page().await {
            records.extend(page?);
        }
        tracing::info!("Collected {} ETFs from the screener", records.len());
        Ok(records)
    }
}

/// Flattens one screener row. Missing or null fields become `None`.
pub fn normalize_row(row: &Value, base_url: &str) -> CatalogRecord {
    let text = |pointer: &str| row.pointer(pointer).and_then(value_text);

    CatalogRecord {
        symbol: text("/symbol/text"),
        name: text("/name/text"),
        url: text("/symbol/url").map(|path| format!("{}{}", base_url, path)),
        one_week_return: text("/one_week_return"),
        one_year_return: text("/ytd"),
        three_year_return: text("/three_ytd"),
        five_year_return: text("/five_ytd"),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Pull-based pager over the screener.
///
/// Yields non-empty pages until the screener returns an empty one. A failing
/// page is yielded once as `Err(PageFailed)` and ends the sequence. Not
/// restartable: ask the scraper for a new pager to start over.
pub struct EtfPages<'a, T> {
    scraper: &'a ListingScraper<T>,
    page_size: u32,
    next: Option<u32>,
}

impl<'a, T: Transport + 'a> EtfPages<'a, T> {
    pub async fn next_page(&mut self) -> Option<Result<Vec<CatalogRecord>, EtfdbError>> {
        let page = self.next.take()?;

        let rows = match self.scraper.fetch_page(page, self.page_size).await {
            Ok(rows) => rows,
            Err(e) => {
                return Some(Err(EtfdbError::PageFailed {
                    page,
                    source: Box::new(e),
                }))
            }
        };

        if rows.is_empty() {
            tracing::info!("Screener page {} is empty, listing complete", page);
            return None;
        }

        let base_url = &self.scraper.config.base_url;
        let records = rows.iter().map(|row| normalize_row(row, base_url)).collect();
        self.next = Some(page + 1);
        Some(Ok(records))
    }

    /// The same sequence as a `futures` stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<CatalogRecord>, EtfdbError>> + 'a {
        stream::unfold(self, |mut pages| async move {
            let page = pages.next_page().await?;
            Some((page, pages))
        })
    }
}
