use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::FetchConfig;
use crate::types::{FetchError, Result};

/// Thin wrapper around a shared `reqwest::Client`. Network calls either return
/// the raw body or fail outright; everything smarter lives in the adapters.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let redirects = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirects)
            .build()?;
        Ok(Self { client })
    }

    /// GET a URL and return the response body, failing on any non-2xx status.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch_text_with_headers(url, &[]).await
    }

    /// Same as `fetch_text`, with extra request headers. The Ben's Bites
    /// endpoint only answers JSON to a browser-looking User-Agent.
    pub async fn fetch_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        debug!(url, "fetching");
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
