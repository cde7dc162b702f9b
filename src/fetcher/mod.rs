pub mod http_fetcher;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::app::Result;

/// Transport used by the content source.
///
/// Implementations return the response body of a successful (2xx) GET and
/// an error for anything else.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
