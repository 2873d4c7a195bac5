use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use nl_core::{
    assemble, ArticleItem, ContentFetcher, Error, ItemView, NewsletterConfig, NewsletterPayload,
    Result, SummaryGenerator,
};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::{BatchReport, ItemStore};

/// One editing session.
///
/// Every mutating operation takes `&mut self`, so operations never overlap
/// and each item's title/summary pair has a single writer. Batch operations
/// call collaborators concurrently (bounded by `max_concurrency`) and apply
/// the results afterwards, one item at a time.
pub struct Pipeline {
    fetcher: Arc<dyn ContentFetcher>,
    generator: Arc<dyn SummaryGenerator>,
    config: NewsletterConfig,
    store: ItemStore,
    semaphore: Semaphore,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        generator: Arc<dyn SummaryGenerator>,
        config: NewsletterConfig,
    ) -> Result<Self> {
        config.validate()?;
        let semaphore = Semaphore::new(config.max_concurrency);
        Ok(Self {
            fetcher,
            generator,
            config,
            store: ItemStore::new(),
            semaphore,
        })
    }

    pub fn config(&self) -> &NewsletterConfig {
        &self.config
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Replaces the session with the urls in `url_list` and fetches each one.
    ///
    /// A failed fetch leaves that item without content and is reported; it
    /// never aborts the batch. The report lists the new keys in order.
    pub async fn intake(&mut self, url_list: &str) -> BatchReport {
        let urls = ItemStore::parse_intake(url_list);
        info!("📥 Fetching {} articles", urls.len());

        let fetcher = self.fetcher.as_ref();
        let semaphore = &self.semaphore;
        let timeout = self.timeout();
        let results = join_all(
            urls.iter()
                .map(|url| with_permit(semaphore, timeout, fetcher.fetch(url))),
        )
        .await;

        let mut report = BatchReport::default();
        let mut fetched = Vec::with_capacity(urls.len());
        for (url, result) in urls.into_iter().zip(results) {
            match result {
                Ok(text) => {
                    fetched.push((url.clone(), Some(text)));
                    report.push(url, Ok(()));
                }
                Err(e) => {
                    warn!("⚠️ Content for {} needs manual input: {}", url, e);
                    fetched.push((url.clone(), None));
                    report.push(url.clone(), Err(Error::fetch_failure(url, e)));
                }
            }
        }
        self.store.replace(fetched);

        info!("✅ Intake finished: {} fetched, {} need manual input", report.succeeded(), report.failed());
        report
    }

    pub fn set_content(&mut self, url: &str, text: &str) -> Result<()> {
        self.store.set_content(url, text)
    }

    pub fn set_title(&mut self, url: &str, text: &str) -> Result<()> {
        self.store.set_title(url, text)
    }

    pub fn set_summary(&mut self, url: &str, text: &str) -> Result<()> {
        self.store.set_summary(url, text)
    }

    /// Generates title and summary for every item, overwriting existing ones.
    pub async fn summarize_all(&mut self) -> BatchReport {
        self.summarize_where(|_| true).await
    }

    /// Generates only for items that still lack a title or summary, leaving
    /// reviewed items alone.
    pub async fn summarize_missing(&mut self) -> BatchReport {
        self.summarize_where(|item| !item.is_complete()).await
    }

    async fn summarize_where<F>(&mut self, select: F) -> BatchReport
    where
        F: FnMut(&ArticleItem) -> bool,
    {
        let inputs = self.store.generation_inputs(select);
        info!("🤖 Generating titles and summaries for {} articles", inputs.len());

        let generator = self.generator.as_ref();
        let config = &self.config;
        let semaphore = &self.semaphore;
        let timeout = self.timeout();
        let results = join_all(inputs.into_iter().map(|(url, content)| async move {
            let outcome = match content {
                Ok(content) => generate_pair(generator, config, semaphore, timeout, &content)
                    .await
                    .map_err(|e| Error::generation_failure(&url, e)),
                Err(e) => Err(e),
            };
            (url, outcome)
        }))
        .await;

        let mut report = BatchReport::default();
        for (url, outcome) in results {
            let applied = outcome.and_then(|(title, summary)| self.store.apply_generated(&url, &title, &summary));
            match &applied {
                Ok(()) => info!("✨ Summary ready for {}", url),
                Err(e) => warn!("⚠️ {}", e),
            }
            report.push(url, applied);
        }

        info!("✅ Generation finished: {} succeeded, {} failed", report.succeeded(), report.failed());
        report
    }

    /// Regenerates title and summary for one item from its current content.
    ///
    /// Both values are replaced together or not at all; no other item is
    /// touched.
    pub async fn regenerate(&mut self, url: &str) -> Result<()> {
        let (key, content) = self.store.begin_regeneration(url)?;
        info!("🔄 Regenerating {}", key);

        let outcome = generate_pair(
            self.generator.as_ref(),
            &self.config,
            &self.semaphore,
            self.timeout(),
            &content,
        )
        .await
        .map_err(|e| Error::generation_failure(&key, e));

        let result = self.store.finish_regeneration(&key, outcome);
        match &result {
            Ok(()) => info!("✨ Regenerated {}", key),
            Err(e) => warn!("⚠️ {}", e),
        }
        result
    }

    pub fn is_ready_for_assembly(&self) -> bool {
        self.store.is_ready_for_assembly()
    }

    pub fn missing_artifacts(&self) -> Vec<String> {
        self.store.missing_artifacts()
    }

    pub fn snapshot(&self) -> Vec<ItemView> {
        self.store.snapshot()
    }

    pub fn assemble(&self) -> Result<NewsletterPayload> {
        let payload = assemble(&self.store.snapshot())?;
        info!("📰 Assembled newsletter with {} articles", payload.total);
        Ok(payload)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }
}

/// Runs a collaborator call under the concurrency limit and the timeout.
async fn with_permit<T, F>(semaphore: &Semaphore, timeout: Duration, call: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let _permit = semaphore.acquire().await.map_err(|e| Error::External(e.into()))?;
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| Error::Timeout { seconds: timeout.as_secs() })?
}

/// Title and summary are independent calls, each holding its own permit;
/// either failing fails the pair.
async fn generate_pair(
    generator: &dyn SummaryGenerator,
    config: &NewsletterConfig,
    semaphore: &Semaphore,
    timeout: Duration,
    content: &str,
) -> Result<(String, String)> {
    tokio::try_join!(
        with_permit(semaphore, timeout, generator.generate_title(content, config)),
        with_permit(semaphore, timeout, generator.generate_summary(content, config)),
    )
}
