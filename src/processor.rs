//! The fetch-and-extract loop over a bill range.

use crate::client::{HttpFetcher, PageFetcher};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract;
use crate::types::{BillOutcome, SkipReason, WitnessSlipRecord};
use async_stream::stream;
use futures::Stream;
use scraper::Html;

/// What one attempt produced, before classification
enum ScrapeAttempt {
    Record(WitnessSlipRecord),
    BadStatus(u16),
}

/// Drives the configured bill range: one fetch per bill in ascending
/// order, a fixed pause after each, every outcome classified and yielded
/// downstream.
pub struct SlipProcessor<F: PageFetcher> {
    config: ScrapeConfig,
    fetcher: F,
}

impl SlipProcessor<HttpFetcher> {
    /// Processor over a real HTTP client honoring the configured timeout.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: PageFetcher> SlipProcessor<F> {
    /// Processor over a caller-supplied fetcher; tests pass the mock here.
    pub fn with_fetcher(config: ScrapeConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Scrape the configured range as a stream of per-bill outcomes.
    ///
    /// Strictly sequential: each bill's outcome is yielded before the
    /// next fetch starts, so at most one request is in flight at a time.
    /// The pause after each bill is unconditional, trailing even the
    /// last one. An inverted range yields nothing.
    pub fn scrape(&self) -> impl Stream<Item = BillOutcome> + '_ {
        Box::pin(stream! {
            for doc_num in self.config.start_bill..=self.config.end_bill {
                eprintln!("Scraping {}...", self.config.bill_number(doc_num));
                yield self.scrape_bill(doc_num).await;
                tokio::time::sleep(self.config.request_delay).await;
            }
        })
    }

    /// Collect just the records, in bill order, dropping skipped bills.
    pub async fn collect_records(&self) -> Vec<WitnessSlipRecord> {
        use futures::StreamExt;
        self.scrape()
            .filter_map(|outcome| async move { outcome.into_record() })
            .collect()
            .await
    }

    /// Fetch and assemble one bill. Failures are absorbed here: an error
    /// becomes a diagnostic line plus a classified skip, never a stream
    /// error, so one bad bill cannot abort the range.
    async fn scrape_bill(&self, doc_num: u32) -> BillOutcome {
        let bill_number = self.config.bill_number(doc_num);
        match self.try_scrape(doc_num).await {
            Ok(ScrapeAttempt::Record(record)) => BillOutcome::Scraped(record),
            // A non-success response means the site has nothing for this
            // bill; skipped without a diagnostic.
            Ok(ScrapeAttempt::BadStatus(status)) => BillOutcome::Skipped {
                bill_number,
                doc_num,
                reason: SkipReason::HttpStatus(status),
            },
            Err(err) => {
                eprintln!("Error on {}: {}", bill_number, err);
                BillOutcome::Skipped {
                    bill_number,
                    doc_num,
                    reason: SkipReason::from(err),
                }
            }
        }
    }

    async fn try_scrape(&self, doc_num: u32) -> Result<ScrapeAttempt> {
        let url = self.config.slip_url(doc_num)?;
        let page = self.fetcher.fetch(&url).await?;
        if !page.is_success() {
            return Ok(ScrapeAttempt::BadStatus(page.status));
        }
        let document = Html::parse_document(&page.body);
        let counts = extract::extract_counts(&document)?;
        Ok(ScrapeAttempt::Record(WitnessSlipRecord::assemble(
            self.config.bill_number(doc_num),
            doc_num,
            counts,
            url.into(),
        )))
    }
}
