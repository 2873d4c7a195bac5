use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Returns the extracted article text for `url`.
    ///
    /// Any error means the text has to be supplied by hand.
    async fn fetch(&self, url: &str) -> Result<String>;
}
