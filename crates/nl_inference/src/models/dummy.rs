use std::fmt;

use nl_core::{Error, NewsletterConfig, Result, SummaryGenerator};

const TITLE_WORDS: usize = 10;
const SUMMARY_CHARS: usize = 500;

/// Offline generator: the title is the opening words of the article and the
/// summary its opening sentences.
pub struct DummyGenerator;

impl fmt::Debug for DummyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyGenerator").finish()
    }
}

impl DummyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SummaryGenerator for DummyGenerator {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_summary(&self, content: &str, config: &NewsletterConfig) -> Result<String> {
        let content = config.truncate(content).trim();
        if content.is_empty() {
            return Err(Error::Inference("nothing to summarize".to_string()));
        }

        let mut summary = String::new();
        for word in content.split_whitespace() {
            let needed = if summary.is_empty() { word.chars().count() } else { word.chars().count() + 1 };
            if summary.chars().count() + needed > SUMMARY_CHARS {
                break;
            }
            if !summary.is_empty() {
                summary.push(' ');
            }
            summary.push_str(word);
        }
        if summary.is_empty() {
            summary = content.chars().take(SUMMARY_CHARS).collect();
        }
        Ok(summary)
    }

    async fn generate_title(&self, content: &str, config: &NewsletterConfig) -> Result<String> {
        let words: Vec<&str> = config.truncate(content).split_whitespace().take(TITLE_WORDS).collect();
        if words.is_empty() {
            return Err(Error::Inference("nothing to title".to_string()));
        }
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_generator() {
        let model = DummyGenerator::new();
        let config = NewsletterConfig::default();
        let content = "This is a test article. It has multiple sentences. This is the third sentence.";

        let title = model.generate_title(content, &config).await.unwrap();
        assert_eq!(title, "This is a test article. It has multiple sentences. This");

        let summary = model.generate_summary(content, &config).await.unwrap();
        assert_eq!(summary, content);
    }

    #[tokio::test]
    async fn test_summary_is_bounded() {
        let model = DummyGenerator::new();
        let config = NewsletterConfig::default();
        let content = "word ".repeat(400);

        let summary = model.generate_summary(&content, &config).await.unwrap();
        assert!(summary.chars().count() <= SUMMARY_CHARS);
        assert!(summary.ends_with("word"));
    }

    #[tokio::test]
    async fn test_respects_truncation_limit() {
        let model = DummyGenerator::new();
        let config = NewsletterConfig {
            content_truncation_limit: 9,
            ..Default::default()
        };
        let title = model.generate_title("alpha beta gamma", &config).await.unwrap();
        assert_eq!(title, "alpha bet");
    }

    #[tokio::test]
    async fn test_empty_content_fails() {
        let model = DummyGenerator::new();
        let config = NewsletterConfig::default();
        assert!(model.generate_title("   ", &config).await.is_err());
        assert!(model.generate_summary("", &config).await.is_err());
    }
}
