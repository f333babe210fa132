use crate::edgar::tickers::Ticker;
use crate::extraction::ExecutionError;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub ticker: Ticker,
    pub title: String,
    pub cik: u64,
}

/// One `<entry>` of a filing feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    pub timestamp: String,
    pub summary: String,
}

/// A row of the output table. Column names are the file's header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Stock Name")]
    pub stock_name: String,
    #[serde(rename = "Filing Time")]
    pub filing_time: String,
    #[serde(rename = "New Product")]
    pub product_name: String,
    #[serde(rename = "Product Description")]
    pub product_description: String,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub companies: usize,
    pub feeds_missing: usize,
    pub filings: usize,
    pub generation_failures: usize,
    pub no_product: usize,
    pub malformed: usize,
    pub rows: usize,
}

#[async_trait::async_trait]
pub trait CompanySource {
    /// All known companies, in provider order.
    async fn companies(&self) -> Result<Vec<Company>>;
}

#[async_trait::async_trait]
pub trait FeedSource {
    /// Raw feed text, or `None` when the provider answered with a non-success status.
    async fn feed(&self, cik: u64, count: usize) -> Result<Option<String>>;
}

#[async_trait::async_trait]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, ExecutionError>;
}
