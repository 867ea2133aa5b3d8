use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::OnceCell;
use url::Url;

use crate::app::{GatorError, Result};
use crate::fetcher::{Fetcher, FETCH_TIMEOUT};

/// reqwest-backed [`Fetcher`]. The client is built on the first request.
pub struct HttpFetcher {
    timeout: Duration,
    client: OnceCell<Client>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(self.timeout)
                    .gzip(true)
                    .brotli(true)
                    .user_agent(concat!("gator/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(GatorError::from)
            })
            .await
    }

    fn transport_error(url: &str, err: reqwest::Error) -> GatorError {
        if err.is_timeout() {
            GatorError::Timeout(url.to_string())
        } else {
            GatorError::Http(err)
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let target = Url::parse(url)?;
        tracing::debug!(url, "fetching feed");

        let response = self
            .client()
            .await?
            .get(target)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| Self::transport_error(url, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        tracing::debug!(url, bytes = body.len(), "feed fetched");
        Ok(body.to_vec())
    }
}
