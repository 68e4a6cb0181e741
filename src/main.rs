use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use slipbot::config::{ScrapeConfigBuilder, DEFAULT_BASE_URL, DEFAULT_OUTPUT_FILE};
use slipbot::processor::SlipProcessor;
use slipbot::types::BillOutcome;
use slipbot::writer;
use std::path::PathBuf;
use std::time::Duration;

/// Scrape witness slip tallies for a range of Illinois General Assembly
/// bills and write them to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "slipbot")]
#[command(version, about = "Scrape ILGA witness slip tallies into a CSV file")]
struct Args {
    /// Document type code (HB, SB, ...)
    #[arg(long, default_value = "HB")]
    doc_type: String,

    /// General Assembly number (e.g. 103)
    #[arg(long)]
    ga: String,

    /// Internal GA identifier the ILGA site expects (e.g. 17)
    #[arg(long)]
    gaid: String,

    /// Internal session identifier (e.g. 112)
    #[arg(long)]
    session_id: String,

    /// First bill number to scrape, inclusive
    #[arg(long, default_value_t = 1)]
    start_bill: u32,

    /// Last bill number to scrape, inclusive
    #[arg(long, default_value_t = 100)]
    end_bill: u32,

    /// Output CSV path
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Pause between bill fetches, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Witness-slip endpoint (override to scrape a local mirror)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ScrapeConfigBuilder::new(&args.ga, &args.gaid, &args.session_id)
        .doc_type(&args.doc_type)
        .bill_range(args.start_bill, args.end_bill)
        .output(&args.output)
        .request_delay(Duration::from_millis(args.delay_ms))
        .timeout(Duration::from_secs(args.timeout_secs))
        .base_url(&args.base_url)
        .build()?;

    let processor = SlipProcessor::new(config.clone())?;
    let mut outcomes = processor.scrape();

    let mut records = Vec::new();
    while let Some(outcome) = outcomes.next().await {
        if let BillOutcome::Scraped(record) = outcome {
            records.push(record);
        }
    }

    let written = writer::write_records(&config.output, &records)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    if written == 0 {
        eprintln!("No data scraped.");
    } else {
        eprintln!("Done. Data saved to {}", config.output.display());
    }

    Ok(())
}
