//! HTTP access to the witness-slip endpoint.
//!
//! Fetching is behind a trait so tests can swap the network out: the real
//! implementation wraps a `reqwest::Client`, and the [`mock`] module
//! (compiled for tests and the `test-utils` feature) serves scripted
//! responses instead.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// User agent sent with every request
const USER_AGENT: &str = concat!("slipbot/", env!("CARGO_PKG_VERSION"));

/// One fetched page: status code plus decoded body text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code of the response
    pub status: u16,
    /// Response body, decoded as text
    pub body: String,
}

impl FetchedPage {
    /// Whether the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single-page fetcher the processor drives once per bill.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`, returning the status and body, or an error if the
    /// request failed in transit.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Fetcher over a shared `reqwest::Client`.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client enforcing `timeout` on every request.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchedPage { status, body })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Scripted fetcher for tests. Responses are keyed on the `DocNum`
    //! query parameter; every requested URL is recorded for assertions.

    use super::{FetchedPage, PageFetcher};
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;

    /// What the mock does when a given bill number is requested.
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Serve this page
        Page(FetchedPage),
        /// Fail the request with a transport-style error
        Transport(String),
    }

    /// In-memory `PageFetcher` serving scripted responses.
    #[derive(Default)]
    pub struct MockFetcher {
        responses: Mutex<HashMap<String, MockResponse>>,
        requested: Mutex<Vec<String>>,
        default_body: Option<String>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` with a 200 status for any bill without a
        /// scripted response.
        pub fn with_default_body(mut self, body: impl Into<String>) -> Self {
            self.default_body = Some(body.into());
            self
        }

        /// Script the response for one bill number.
        pub fn respond(&self, doc_num: u32, response: MockResponse) {
            self.responses
                .lock()
                .unwrap()
                .insert(doc_num.to_string(), response);
        }

        /// Serve a 200 page with `body` for `doc_num`.
        pub fn respond_with_page(&self, doc_num: u32, body: impl Into<String>) {
            self.respond(
                doc_num,
                MockResponse::Page(FetchedPage {
                    status: 200,
                    body: body.into(),
                }),
            );
        }

        /// Serve `status` with an empty body for `doc_num`.
        pub fn respond_with_status(&self, doc_num: u32, status: u16) {
            self.respond(
                doc_num,
                MockResponse::Page(FetchedPage {
                    status,
                    body: String::new(),
                }),
            );
        }

        /// Fail `doc_num` with a transport-style error.
        pub fn fail_with_transport(&self, doc_num: u32, message: impl Into<String>) {
            self.respond(doc_num, MockResponse::Transport(message.into()));
        }

        /// Every URL requested so far, in request order.
        pub fn requested_urls(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
            self.requested.lock().unwrap().push(url.to_string());

            let doc_num = url
                .query_pairs()
                .find_map(|(key, value)| (key == "DocNum").then(|| value.into_owned()))
                .unwrap_or_default();

            let scripted = self.responses.lock().unwrap().get(&doc_num).cloned();
            match scripted {
                Some(MockResponse::Page(page)) => Ok(page),
                Some(MockResponse::Transport(message)) => Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    message,
                )
                .into()),
                None => match &self.default_body {
                    Some(body) => Ok(FetchedPage {
                        status: 200,
                        body: body.clone(),
                    }),
                    None => Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no scripted response for DocNum {}", doc_num),
                    )
                    .into()),
                },
            }
        }
    }
}
