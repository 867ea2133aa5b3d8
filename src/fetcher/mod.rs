pub mod http_fetcher;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// Upper bound on a whole feed request, connect through body.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the response body. Either the full body
    /// arrives or an error is returned; there is no retry.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
