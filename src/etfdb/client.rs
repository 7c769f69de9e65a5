// src/etfdb/client.rs
use async_trait::async_trait;
use reqwest::header;

use crate::etfdb::models::ScreenerRequest;
use crate::utils::config::EtfdbConfig;
use crate::utils::error::EtfdbError;

/// Raw content supplier for both the profile pages and the screener API.
///
/// Implementations return the body untouched; a non-2xx response must come back
/// as [`EtfdbError::Http`], connection problems as a transport-class error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GETs an HTML document.
    async fn fetch_document(&self, url: &str) -> Result<String, EtfdbError>;

    /// POSTs one screener page request and returns the raw JSON body.
    async fn post_page(&self, url: &str, request: &ScreenerRequest) -> Result<String, EtfdbError>;
}

/// reqwest-backed [`Transport`] configured for etfdb.com.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &EtfdbConfig) -> Result<Self, EtfdbError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?; // Propagate client build error if any
        Ok(Self { http })
    }
}

/// Maps the status of a finished response onto the crate error, logging failures.
fn check_status(response: &reqwest::Response, url: &str) -> Result<(), EtfdbError> {
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - etfdb.com may be rejecting the User-Agent.");
        }
        return Err(EtfdbError::http(status));
    }
    Ok(())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_document(&self, url: &str) -> Result<String, EtfdbError> {
        tracing::info!("Downloading document from: {}", url);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?; // Propagates reqwest::Error as EtfdbError::Network

        check_status(&response, url)?;

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    async fn post_page(&self, url: &str, request: &ScreenerRequest) -> Result<String, EtfdbError> {
        tracing::debug!("Posting screener request {:?} to {}", request, url);

        let response = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        check_status(&response, url)?;

        Ok(response.text().await?)
    }
}
