use std::time::Duration;

use async_trait::async_trait;
use nl_core::{ContentFetcher, Error, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::extract::extract_article_text;

pub const DEFAULT_USER_AGENT: &str = "nl-newsletter/0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Downloads a page and extracts the text of its `<article>` element.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Scraping(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpFetcherConfig::default())
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("🌐 Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        debug!("Downloaded {} bytes from {}", html.len(), url);

        let text = extract_article_text(&html)?;
        info!("📰 Extracted {} characters from {}", text.chars().count(), url);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_extracts_article() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/story"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><article><p>Hello</p><p>world</p></article></html>"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_defaults().unwrap();
        let text = fetcher.fetch(&format!("{}/story", server.uri())).await.unwrap();
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn test_fetch_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_defaults().unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_fetch_fails_without_article() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<div>teaser</div>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_defaults().unwrap();
        let result = fetcher.fetch(&server.uri()).await;
        assert!(matches!(result, Err(Error::Scraping(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let fetcher = HttpFetcher::with_defaults().unwrap();
        assert!(fetcher.fetch("not a url").await.is_err());
    }
}
