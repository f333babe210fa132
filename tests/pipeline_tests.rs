use anyhow::Result;
use product_scout::core::types::{Company, CompanySource, FeedSource, TextGenerator};
use product_scout::edgar::tickers::parse_company_tickers;
use product_scout::extraction::ExecutionError;
use product_scout::{Pipeline, ScoutConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TICKERS_JSON: &str = r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#;

const FEED: &str = r#"<?xml version="1.0" encoding="ISO-8859-1" ?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <summary type="html">&lt;b&gt;Filed:&lt;/b&gt; 2024-09-09 Apple introduces Widget X</summary>
    <title>8-K  - Current report</title>
    <updated>2024-09-09T16:05:12-04:00</updated>
  </entry>
</feed>"#;

struct StubCompanies;

#[async_trait::async_trait]
impl CompanySource for StubCompanies {
    async fn companies(&self) -> Result<Vec<Company>> {
        parse_company_tickers(TICKERS_JSON)
    }
}

struct StubFeed;

#[async_trait::async_trait]
impl FeedSource for StubFeed {
    async fn feed(&self, cik: u64, _count: usize) -> Result<Option<String>> {
        Ok((cik == 320193).then(|| FEED.to_string()))
    }
}

struct CannedModel;

#[async_trait::async_trait]
impl TextGenerator for CannedModel {
    async fn generate(&self, prompt: &str) -> Result<String, ExecutionError> {
        if prompt.contains("Widget X") {
            Ok("Acme Corp | Widget X | A new widget.".to_string())
        } else {
            Ok("No new products mentioned.".to_string())
        }
    }
}

async fn run_to(path: &Path) -> String {
    let config = ScoutConfig {
        output_path: path.to_path_buf(),
        show_progress: false,
        ..ScoutConfig::default()
    };
    Pipeline::new(&config, &StubCompanies, &StubFeed, &CannedModel)
        .run()
        .await
        .unwrap();
    fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_single_company_single_filing_end_to_end() {
    let dir = tempdir().unwrap();
    let output = run_to(&dir.path().join("results.csv")).await;

    assert_eq!(
        output,
        "Company Name|Stock Name|Filing Time|New Product|Product Description\n\
         AAPL|AAPL|2024-09-09T16:05:12-04:00|Widget X|A new widget.\n"
    );
}

#[tokio::test]
async fn test_identical_inputs_give_identical_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("nested/second.csv");

    run_to(&first).await;
    run_to(&second).await;

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[tokio::test]
async fn test_run_without_rows_still_writes_header() {
    struct SilentModel;

    #[async_trait::async_trait]
    impl TextGenerator for SilentModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ExecutionError> {
            Ok("No new products mentioned.".to_string())
        }
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let config = ScoutConfig {
        output_path: path.clone(),
        self_test_sample: None,
        ..ScoutConfig::default()
    };

    let summary = Pipeline::new(&config, &StubCompanies, &StubFeed, &SilentModel)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.rows, 0);
    assert_eq!(summary.no_product, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Company Name|Stock Name|Filing Time|New Product|Product Description\n"
    );
}
