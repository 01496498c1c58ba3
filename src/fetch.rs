use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retrieves the HTML of a listing page.
///
/// Any transport failure or non-success status is a [`Error::Fetch`]; callers
/// do not retry.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP fetcher.
///
/// A client is built per call so the fetcher can be shared with async code
/// and only ever touched from blocking threads.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| Error::fetch(url.as_str(), format!("build http client: {err}")))?;

        tracing::info!(%url, "fetching listing");
        let response = client
            .get(url.clone())
            .header(USER_AGENT, concat!("showshelf/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .map_err(|err| Error::fetch(url.as_str(), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url.as_str(), format!("http status {status}")));
        }

        response
            .text()
            .map_err(|err| Error::fetch(url.as_str(), format!("read body: {err}")))
    }
}
