// src/profile/client.rs
use std::sync::Arc;

use crate::etfdb::{HttpTransport, Transport};
use crate::extractors::{self, Exposure, FlatRecord, NestedRecord, ParsedDocument};
use crate::profile::{assemble, merged_fields, EtfProfile, FlatSections, HoldingsSection, ProfileFields};
use crate::tickers::{ResolvedTicker, SymbolCatalog};
use crate::utils::config::EtfdbConfig;
use crate::utils::error::EtfdbError;

/// Looks ETFs up on etfdb.com and turns their pages into typed sections.
///
/// Every call validates the ticker against the catalog first, then fetches and
/// parses the detail page once. Nothing is cached between calls.
pub struct EtfClient<T = HttpTransport> {
    transport: T,
    config: EtfdbConfig,
    catalog: Arc<SymbolCatalog>,
}

impl EtfClient<HttpTransport> {
    pub fn new(config: EtfdbConfig, catalog: Arc<SymbolCatalog>) -> Result<Self, EtfdbError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config, catalog))
    }
}

impl<T: Transport> EtfClient<T> {
    pub fn with_transport(transport: T, config: EtfdbConfig, catalog: Arc<SymbolCatalog>) -> Self {
        Self {
            transport,
            config,
            catalog,
        }
    }

    pub fn config(&self) -> &EtfdbConfig {
        &self.config
    }

    pub fn resolve(&self, ticker: &str) -> Result<ResolvedTicker, EtfdbError> {
        self.catalog.resolve(ticker, &self.config.base_url)
    }

    /// Resolves `ticker`, fetches its page and hands the parsed document to `read`.
    ///
    /// The document is built after the last await so the returned future stays `Send`.
    async fn section<R, F>(&self, ticker: &str, read: F) -> Result<R, EtfdbError>
    where
        F: FnOnce(&ParsedDocument, &ResolvedTicker) -> R,
    {
        let resolved = self.resolve(ticker)?;
        tracing::info!("Looking up {} at {}", resolved.symbol, resolved.url);

        let raw = self.transport.fetch_document(&resolved.document_url()).await?;
        let doc = ParsedDocument::parse(&raw, &self.config.base_url);
        Ok(read(&doc, &resolved))
    }

    /// The full profile: merged flat fields plus every nested section.
    pub async fn profile(&self, ticker: &str) -> Result<EtfProfile, EtfdbError> {
        self.section(ticker, assemble).await
    }

    /// Merged flat fields only (issuer, structure, trading data, classification, ...).
    pub async fn basic_info(&self, ticker: &str) -> Result<ProfileFields, EtfdbError> {
        self.section(ticker, |doc, resolved| merged_fields(FlatSections::extract(doc), resolved))
            .await
    }

    pub async fn holdings(&self, ticker: &str) -> Result<HoldingsSection, EtfdbError> {
        self.section(ticker, |doc, _| HoldingsSection::extract(doc)).await
    }

    pub async fn valuation(&self, ticker: &str) -> Result<NestedRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::valuation(doc)).await
    }

    pub async fn size(&self, ticker: &str) -> Result<NestedRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::size_breakdown(doc)).await
    }

    pub async fn dividends(&self, ticker: &str) -> Result<NestedRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::dividends(doc)).await
    }

    pub async fn performance(&self, ticker: &str) -> Result<NestedRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::performance(doc)).await
    }

    pub async fn technicals(&self, ticker: &str) -> Result<FlatRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::technicals(doc)).await
    }

    pub async fn volatility(&self, ticker: &str) -> Result<FlatRecord, EtfdbError> {
        self.section(ticker, |doc, _| extractors::volatility(doc)).await
    }

    pub async fn exposure(&self, ticker: &str) -> Result<Exposure, EtfdbError> {
        self.section(ticker, |doc, _| extractors::exposure(doc)).await
    }
}
