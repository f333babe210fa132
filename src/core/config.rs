use crate::edgar::report::ReportType;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";
pub const FEED_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar";
pub const USER_AGENT: &str = "software@example.com";
pub const OUTPUT_PATH: &str = "new_product_announcements.csv";

pub const PROMPT_TEMPLATE: &str = "Read the following SEC filing summary and identify any new \
product announcements. If a new product is announced, reply with exactly one line in the \
format: Company Name | Product Name | Product Description. If no new products are \
announced, reply with exactly: No new products mentioned.";

pub const SELF_TEST_SAMPLE: &str =
    "Apple Inc. today announced the iPhone 15, featuring a new titanium design and a 48MP camera.";

#[derive(Clone, Debug)]
pub struct ScoutConfig {
    pub user_agent: String,
    pub tickers_url: Url,
    pub feed_url: Url,
    pub filing_type: ReportType,
    pub company_limit: usize,
    pub filings_per_company: usize,
    pub request_timeout: Duration,
    pub model_program: String,
    pub model_args: Vec<String>,
    pub prompt_template: String,
    pub self_test_sample: Option<String>,
    pub output_path: PathBuf,
    pub show_progress: bool,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            tickers_url: Url::parse(TICKERS_URL).expect("static tickers url"),
            feed_url: Url::parse(FEED_URL).expect("static feed url"),
            filing_type: ReportType::Form8K,
            company_limit: 10,
            filings_per_company: 10,
            request_timeout: Duration::from_secs(10),
            model_program: "ollama".to_string(),
            model_args: vec!["run".to_string(), "llama3".to_string()],
            prompt_template: PROMPT_TEMPLATE.to_string(),
            self_test_sample: Some(SELF_TEST_SAMPLE.to_string()),
            output_path: PathBuf::from(OUTPUT_PATH),
            show_progress: true,
        }
    }
}

impl ScoutConfig {
    /// Defaults overlaid with whatever is set in the environment (and `.env`).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_agent) = lookup("USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(url) = lookup("SCOUT_TICKERS_URL") {
            config.tickers_url =
                Url::parse(&url).with_context(|| format!("Invalid SCOUT_TICKERS_URL: {}", url))?;
        }
        if let Some(url) = lookup("SCOUT_FEED_URL") {
            config.feed_url =
                Url::parse(&url).with_context(|| format!("Invalid SCOUT_FEED_URL: {}", url))?;
        }
        if let Some(filing_type) = lookup("SCOUT_FILING_TYPE") {
            config.filing_type = ReportType::parse_known(&filing_type).map_err(|e| anyhow!(e))?;
        }
        if let Some(limit) = lookup("SCOUT_COMPANY_LIMIT") {
            config.company_limit = parse_count("SCOUT_COMPANY_LIMIT", &limit)?;
        }
        if let Some(count) = lookup("SCOUT_FILINGS_PER_COMPANY") {
            config.filings_per_company = parse_count("SCOUT_FILINGS_PER_COMPANY", &count)?;
        }
        if let Some(secs) = lookup("SCOUT_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_timeout("SCOUT_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(command) = lookup("SCOUT_MODEL_COMMAND") {
            let mut parts = command.split_whitespace().map(String::from);
            config.model_program = parts
                .next()
                .ok_or_else(|| anyhow!("SCOUT_MODEL_COMMAND cannot be empty"))?;
            config.model_args = parts.collect();
        }
        if let Some(path) = lookup("SCOUT_OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("{} must be a non-negative integer, got {:?}", key, value))
}

// A zero reqwest timeout fails every request immediately.
fn parse_timeout(key: &str, value: &str) -> Result<Duration> {
    match parse_count(key, value)? {
        0 => Err(anyhow!("{} must be at least 1 second, got {:?}", key, value)),
        secs => Ok(Duration::from_secs(secs as u64)),
    }
}
