//! Scrape witness slip tallies for Illinois General Assembly bills.
//!
//! The ILGA witness-slip page shows, per bill, how many proponent,
//! opponent, and no-position slips were filed. This library walks a
//! contiguous bill range one request at a time, extracts those three
//! counters from each page, and yields per-bill outcomes as a stream;
//! the binary collects the successful ones and serializes them to CSV.
//!
//! ```no_run
//! use slipbot::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let config = ScrapeConfigBuilder::new("103", "17", "112")
//!     .bill_range(1, 50)
//!     .build()?;
//! let processor = SlipProcessor::new(config)?;
//! let records = processor.collect_records().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod processor;
pub mod types;
pub mod writer;

pub use client::{FetchedPage, HttpFetcher, PageFetcher};
pub use config::{ScrapeConfig, ScrapeConfigBuilder};
pub use error::{Error, Result};
pub use extract::extract_counts;
pub use processor::SlipProcessor;
pub use types::{BillOutcome, SkipReason, SlipCounts, WitnessSlipRecord};
pub use writer::write_records;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ScrapeConfig, ScrapeConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::processor::SlipProcessor;
    pub use crate::types::{BillOutcome, SkipReason, SlipCounts, WitnessSlipRecord};
    pub use futures::StreamExt;
}
