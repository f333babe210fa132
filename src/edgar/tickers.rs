use crate::core::types::Company;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(ticker: String) -> Result<Self> {
        let uppercase_ticker = ticker.trim().to_uppercase();
        if uppercase_ticker.is_empty() {
            return Err(anyhow!("Ticker cannot be empty"));
        }
        if !uppercase_ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(anyhow!(
                "Ticker must contain only alphanumeric characters, dots or hyphens: {}",
                ticker
            ));
        }
        Ok(Ticker(uppercase_ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
    title: String,
}

/// Parses `company_tickers.json`: an object keyed `"0"`, `"1"`, ... whose values
/// carry `cik_str`, `ticker` and `title`. Companies come back in key order.
pub fn parse_company_tickers(json_string: &str) -> Result<Vec<Company>> {
    let json: HashMap<String, TickerEntry> =
        serde_json::from_str(json_string).context("Failed to parse company tickers JSON")?;
    log::debug!("Found {} ticker entries", json.len());

    let mut indexed = json
        .into_iter()
        .map(|(key, entry)| {
            let index = key
                .parse::<u64>()
                .map_err(|_| anyhow!("Unexpected key in company tickers JSON: {}", key))?;
            Ok((index, entry))
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(index, _)| *index);

    let companies = indexed
        .into_iter()
        .filter_map(|(_, entry)| match Ticker::new(entry.ticker) {
            Ok(ticker) => Some(Company {
                ticker,
                title: entry.title,
                cik: entry.cik_str,
            }),
            Err(e) => {
                log::debug!("Skipping ticker entry for CIK {}: {}", entry.cik_str, e);
                None
            }
        })
        .collect::<Vec<_>>();

    log::debug!("Finished processing {} tickers", companies.len());
    Ok(companies)
}
