use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default witness-slip endpoint on the ILGA site
pub const DEFAULT_BASE_URL: &str = "https://www.ilga.gov/legislation/witnessslip.asp";

/// Default output path
pub const DEFAULT_OUTPUT_FILE: &str = "witness_slips_output.csv";

/// Unconditional pause after every bill fetch
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Per-request client timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Witness-slip endpoint; overriding it is mainly useful in tests
    pub base_url: String,
    /// Document type code scoping the query (HB, SB, ...)
    pub doc_type: String,
    /// General Assembly number (e.g. "103")
    pub ga: String,
    /// Internal GA identifier the ILGA site expects (e.g. "17")
    pub ga_id: String,
    /// Internal session identifier (e.g. "112")
    pub session_id: String,
    /// First bill number, inclusive
    pub start_bill: u32,
    /// Last bill number, inclusive
    pub end_bill: u32,
    /// Output CSV path
    pub output: PathBuf,
    /// Pause inserted after every bill, success or failure
    pub request_delay: Duration,
    /// Client timeout for each request
    pub timeout: Duration,
}

impl ScrapeConfig {
    /// Create a configuration with the required session identifiers and
    /// defaults everywhere else.
    pub fn new(
        ga: impl Into<String>,
        ga_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            doc_type: "HB".to_string(),
            ga: ga.into(),
            ga_id: ga_id.into(),
            session_id: session_id.into(),
            start_bill: 1,
            end_bill: 100,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            request_delay: DEFAULT_REQUEST_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Validate the configuration.
    ///
    /// An inverted bill range is allowed (it scrapes nothing); a missing
    /// session identifier or an unparseable endpoint is not.
    pub fn validate(&self) -> Result<()> {
        if self.doc_type.is_empty() {
            return Err(Error::Config(
                "Document type must not be empty".to_string(),
            ));
        }
        if self.ga.is_empty() || self.ga_id.is_empty() || self.session_id.is_empty() {
            return Err(Error::Config(
                "GA number, GA identifier and session identifier must all be set".to_string(),
            ));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        Ok(())
    }

    /// Display form of a bill: the document type code plus the number
    /// padded to four digits (`HB0042`). Numbers past 9999 keep all
    /// their digits.
    pub fn bill_number(&self, doc_num: u32) -> String {
        format!("{}{:04}", self.doc_type, doc_num)
    }

    /// Build the witness-slip query URL for one bill.
    ///
    /// Parameter order matches what the ILGA endpoint serves links in;
    /// `LegID` and `SpecSess` ride along empty. Deterministic: the same
    /// configuration and bill number always produce the same string.
    pub fn slip_url(&self, doc_num: u32) -> Result<Url> {
        let doc_num = doc_num.to_string();
        let params = [
            ("DocNum", doc_num.as_str()),
            ("DocTypeID", self.doc_type.as_str()),
            ("LegID", ""),
            ("GAID", self.ga_id.as_str()),
            ("SessionID", self.session_id.as_str()),
            ("GA", self.ga.as_str()),
            ("SpecSess", ""),
        ];
        Ok(Url::parse_with_params(&self.base_url, &params)?)
    }
}

/// Builder for scrape configurations
#[derive(Debug, Clone)]
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    /// Start from the required session identifiers.
    pub fn new(
        ga: impl Into<String>,
        ga_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            config: ScrapeConfig::new(ga, ga_id, session_id),
        }
    }

    /// Override the witness-slip endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the document type code (HB, SB, ...).
    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.config.doc_type = doc_type.into();
        self
    }

    /// Set the inclusive bill number range.
    pub fn bill_range(mut self, start: u32, end: u32) -> Self {
        self.config.start_bill = start;
        self.config.end_bill = end;
        self
    }

    /// Set the output CSV path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Set the pause inserted after every bill.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Validate and build the final configuration.
    pub fn build(self) -> Result<ScrapeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
