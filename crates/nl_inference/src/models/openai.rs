use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nl_core::{Error, NewsletterConfig, Result, SummaryGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Config;

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Generator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiGenerator {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;
        info!("🤖 Using chat-completion endpoint {}", config.base_url);
        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        content: &str,
        config: &NewsletterConfig,
    ) -> Result<String> {
        let truncated = config.truncate(content);
        debug!(
            "Requesting completion from {} with {} characters of content",
            config.model_id,
            truncated.chars().count()
        );

        let request = ChatRequest {
            model: &config.model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{}:\n\n{}", user_prompt, truncated),
                },
            ],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Inference(format!("Model returned {}: {}", status, message)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::Inference("Model returned no choices".to_string()))
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate_summary(&self, content: &str, config: &NewsletterConfig) -> Result<String> {
        self.complete(
            &config.system_prompt_summary,
            &config.user_prompt_summary,
            content,
            config,
        )
        .await
    }

    async fn generate_title(&self, content: &str, config: &NewsletterConfig) -> Result<String> {
        let title = self
            .complete(&config.system_prompt_title, &config.user_prompt_title, content, config)
            .await?;
        Ok(strip_wrapping_quotes(&title).to_string())
    }
}

/// Models like to answer with `"Title"`; drop one pair of enclosing quotes.
fn strip_wrapping_quotes(text: &str) -> &str {
    const PAIRS: &[(char, char)] = &[('"', '"'), ('„', '”'), ('“', '”'), ('\'', '\''), ('«', '»')];
    let mut chars = text.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if PAIRS.contains(&(first, last)) {
            return text[first.len_utf8()..text.len() - last.len_utf8()].trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(server: &MockServer) -> OpenAiGenerator {
        OpenAiGenerator::new(Config {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    fn reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
        }))
    }

    #[tokio::test]
    async fn test_summary_request_uses_config() {
        let server = MockServer::start().await;
        let config = NewsletterConfig {
            model_id: "gpt-4".to_string(),
            system_prompt_summary: "SYS".to_string(),
            user_prompt_summary: "USER".to_string(),
            content_truncation_limit: 5,
            ..Default::default()
        };

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "SYS"},
                    {"role": "user", "content": "USER:\n\nabcde"}
                ]
            })))
            .respond_with(reply("  A short summary.  "))
            .expect(1)
            .mount(&server)
            .await;

        let summary = generator(&server)
            .generate_summary("abcdefghij", &config)
            .await
            .unwrap();
        assert_eq!(summary, "A short summary.");
    }

    #[tokio::test]
    async fn test_title_strips_quotes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(reply("\"Breaking News\""))
            .mount(&server)
            .await;

        let title = generator(&server)
            .generate_title("content", &NewsletterConfig::default())
            .await
            .unwrap();
        assert_eq!(title, "Breaking News");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = generator(&server)
            .generate_summary("content", &NewsletterConfig::default())
            .await
            .unwrap_err();
        match err {
            Error::Inference(msg) => assert!(msg.contains("Incorrect API key provided"), "{}", msg),
            other => panic!("expected inference error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = generator(&server)
            .generate_title("content", &NewsletterConfig::default())
            .await;
        assert!(matches!(result, Err(Error::Inference(_))));
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping_quotes("\"Title\""), "Title");
        assert_eq!(strip_wrapping_quotes("„Tytuł”"), "Tytuł");
        assert_eq!(strip_wrapping_quotes("Say \"hi\""), "Say \"hi\"");
        assert_eq!(strip_wrapping_quotes("\""), "\"");
        assert_eq!(strip_wrapping_quotes(""), "");
    }
}
