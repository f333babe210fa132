use super::report::ReportType;
use super::tickers::parse_company_tickers;
use crate::core::config::ScoutConfig;
use crate::core::types::{Company, CompanySource, FeedSource};
use anyhow::{anyhow, Context, Result};
use mime::{APPLICATION_JSON, TEXT_XML};
use reqwest::{header, Client};
use url::Url;

/// Talks to the two SEC endpoints the pipeline needs.
pub struct EdgarClient {
    http: Client,
    tickers_url: Url,
    feed_url: Url,
    filing_type: ReportType,
}

impl EdgarClient {
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            tickers_url: config.tickers_url.clone(),
            feed_url: config.feed_url.clone(),
            filing_type: config.filing_type.clone(),
        })
    }

    pub fn feed_url(&self, cik: u64, count: usize) -> Url {
        build_feed_url(&self.feed_url, cik, &self.filing_type, count)
    }
}

/// Browse-edgar Atom URL for one company, CIK zero-padded to 10 digits.
pub fn build_feed_url(base: &Url, cik: u64, filing_type: &ReportType, count: usize) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("action", "getcompany")
        .append_pair("CIK", &format!("{:010}", cik))
        .append_pair("type", &filing_type.to_string())
        .append_pair("dateb", "")
        .append_pair("owner", "include")
        .append_pair("count", &count.to_string())
        .append_pair("output", "atom");
    url
}

#[async_trait::async_trait]
impl CompanySource for EdgarClient {
    async fn companies(&self) -> Result<Vec<Company>> {
        log::info!("Fetching company tickers from {}", self.tickers_url);

        let response = self
            .http
            .get(self.tickers_url.as_str())
            .header(header::ACCEPT, APPLICATION_JSON.essence_str())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.tickers_url))?;

        log::debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP request for company tickers failed with status: {}",
                response.status()
            ));
        }

        let content = response.text().await?;
        log::debug!("Received content length: {}", content.len());
        parse_company_tickers(&content)
    }
}

#[async_trait::async_trait]
impl FeedSource for EdgarClient {
    async fn feed(&self, cik: u64, count: usize) -> Result<Option<String>> {
        let url = self.feed_url(cik, count);
        log::debug!("Fetching filing feed: {}", url);

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, TEXT_XML.essence_str())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Failed to fetch filings for CIK {:010}: status {}", cik, status);
            return Ok(None);
        }

        let content = response.text().await?;
        log::debug!("Received {} bytes of feed for CIK {:010}", content.len(), cik);
        Ok(Some(content))
    }
}
