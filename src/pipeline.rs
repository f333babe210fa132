use crate::core::config::ScoutConfig;
use crate::core::types::{
    Company, CompanySource, ExtractionResult, FeedSource, Filing, RunSummary, TextGenerator,
};
use crate::edgar::feed::parse_feed;
use crate::extraction::{build_prompt, split_reply, ExecutionError, ReplyOutcome};
use crate::output::write_results;
use crate::utils::progress::ProgressTracker;
use anyhow::Result;
use colored::*;

/// Companies x filings -> model -> rows. Every step is awaited in turn.
pub struct Pipeline<'a> {
    config: &'a ScoutConfig,
    companies: &'a (dyn CompanySource + Sync),
    feeds: &'a (dyn FeedSource + Sync),
    generator: &'a (dyn TextGenerator + Sync),
    progress: ProgressTracker,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a ScoutConfig,
        companies: &'a (dyn CompanySource + Sync),
        feeds: &'a (dyn FeedSource + Sync),
        generator: &'a (dyn TextGenerator + Sync),
    ) -> Self {
        Self {
            config,
            companies,
            feeds,
            generator,
            progress: ProgressTracker::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressTracker) -> Self {
        self.progress = progress;
        self
    }

    /// Self-test, extraction over every company, then the output file.
    pub async fn run(&self) -> Result<RunSummary> {
        if let Some(sample) = &self.config.self_test_sample {
            self.self_test(sample).await;
        }

        let (rows, summary) = self.collect().await?;
        write_results(&self.config.output_path, &rows)?;
        Ok(summary)
    }

    /// Console check that the model answers at all. Nothing here reaches the output.
    pub async fn self_test(&self, sample: &str) -> Option<String> {
        println!("{}", "Model self-test".yellow().bold());
        println!("  {} {}", "input:".dimmed(), sample);

        match self.extract(sample).await {
            Ok(reply) => {
                println!("  {} {}", "reply:".dimmed(), reply.green());
                Some(reply)
            }
            Err(e) => {
                log::error!("Self-test failed: {}", e);
                println!("  {} {}", "error:".dimmed(), e.to_string().red());
                None
            }
        }
    }

    pub async fn collect(&self) -> Result<(Vec<ExtractionResult>, RunSummary)> {
        let companies: Vec<Company> = self
            .companies
            .companies()
            .await?
            .into_iter()
            .take(self.config.company_limit)
            .collect();
        log::info!("Processing {} companies", companies.len());
        self.progress.set_length(companies.len() as u64);

        let mut rows = Vec::new();
        let mut summary = RunSummary::default();

        for company in &companies {
            self.progress.update_message(company.ticker.as_str());
            summary.companies += 1;

            let filings = self.filings_for(company).await?;
            if filings.is_none() {
                summary.feeds_missing += 1;
            }
            let filings = filings.unwrap_or_default();
            log::info!("{}: {} filings", company.ticker, filings.len());

            for filing in &filings {
                summary.filings += 1;
                if let Some(row) = self.process_filing(company, filing, &mut summary).await {
                    rows.push(row);
                }
            }
            self.progress.increment(1);
        }

        self.progress.finish();
        summary.rows = rows.len();
        Ok((rows, summary))
    }

    async fn filings_for(&self, company: &Company) -> Result<Option<Vec<Filing>>> {
        let feed = self
            .feeds
            .feed(company.cik, self.config.filings_per_company)
            .await?;
        match feed {
            Some(content) => Ok(Some(parse_feed(&content))),
            None => {
                log::warn!("No filings retrieved for {} (CIK {:010})", company.ticker, company.cik);
                Ok(None)
            }
        }
    }

    async fn process_filing(
        &self,
        company: &Company,
        filing: &Filing,
        summary: &mut RunSummary,
    ) -> Option<ExtractionResult> {
        let reply = match self.extract(&filing.summary).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!(
                    "Extraction failed for {} filing at {}: {}",
                    company.ticker,
                    filing.timestamp,
                    e
                );
                summary.generation_failures += 1;
                return None;
            }
        };

        match split_reply(Some(reply.as_str())) {
            ReplyOutcome::Mention(mention) => {
                log::debug!(
                    "{}: model named company {:?}, product {:?}",
                    company.ticker,
                    mention.company,
                    mention.product
                );
                // Ticker and timestamp come from the loop, not from the reply.
                Some(ExtractionResult {
                    company_name: company.ticker.to_string(),
                    stock_name: company.ticker.to_string(),
                    filing_time: filing.timestamp.clone(),
                    product_name: mention.product,
                    product_description: mention.description,
                })
            }
            ReplyOutcome::NoProduct => {
                summary.no_product += 1;
                None
            }
            ReplyOutcome::Malformed { .. } => {
                summary.malformed += 1;
                None
            }
        }
    }

    async fn extract(&self, text: &str) -> Result<String, ExecutionError> {
        let prompt = build_prompt(&self.config.prompt_template, text);
        self.generator.generate(&prompt).await
    }
}
