use async_trait::async_trait;

use crate::config::NewsletterConfig;
use crate::Result;

/// Produces the newsletter artifacts for one article.
///
/// Implementations truncate `content` with [`NewsletterConfig::truncate`] and
/// use the model and prompts from `config`. Title and summary are independent
/// calls.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_summary(&self, content: &str, config: &NewsletterConfig) -> Result<String>;

    async fn generate_title(&self, content: &str, config: &NewsletterConfig) -> Result<String>;
}
