use anyhow::Result;
use colored::*;
use product_scout::{
    edgar::{report::ReportType, EdgarClient},
    extraction::ModelCommand,
    Pipeline, ProgressTracker, ScoutConfig,
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "product-scout",
    about = "Extract new product announcements from recent SEC filings"
)]
struct Opt {
    /// Where to write the pipe-delimited results
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Number of companies to scan, in SEC ticker-file order
    #[structopt(long)]
    companies: Option<usize>,

    /// Filings to request per company
    #[structopt(long)]
    filings: Option<usize>,

    /// Filing type to scan; unknown types are rejected with the list of accepted ones
    #[structopt(long = "filing-type", parse(try_from_str = ReportType::parse_known))]
    filing_type: Option<ReportType>,

    /// Skip the model self-test
    #[structopt(long)]
    skip_self_test: bool,

    /// Hide the progress bar
    #[structopt(long)]
    no_progress: bool,
}

impl Opt {
    fn apply(self, config: &mut ScoutConfig) {
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(companies) = self.companies {
            config.company_limit = companies;
        }
        if let Some(filings) = self.filings {
            config.filings_per_company = filings;
        }
        if let Some(filing_type) = self.filing_type {
            config.filing_type = filing_type;
        }
        if self.skip_self_test {
            config.self_test_sample = None;
        }
        if self.no_progress {
            config.show_progress = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    log::debug!("Logger initialized");

    let mut config = ScoutConfig::from_env()?;
    Opt::from_args().apply(&mut config);
    log::debug!("Running with {:?}", config);

    let edgar = EdgarClient::new(&config)?;
    let model = ModelCommand::from_config(&config);

    let progress = if config.show_progress {
        ProgressTracker::new(config.company_limit as u64)
    } else {
        ProgressTracker::hidden()
    };

    let summary = Pipeline::new(&config, &edgar, &edgar, &model)
        .with_progress(progress)
        .run()
        .await?;

    println!(
        "{} {} rows from {} filings across {} companies written to {}",
        "Done:".green().bold(),
        summary.rows,
        summary.filings,
        summary.companies,
        config.output_path.display()
    );
    if summary.feeds_missing + summary.generation_failures + summary.malformed > 0 {
        println!(
            "{}",
            format!(
                "Skipped: {} missing feeds, {} model failures, {} malformed replies",
                summary.feeds_missing, summary.generation_failures, summary.malformed
            )
            .yellow()
        );
    }

    Ok(())
}
