use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TRUNCATION_LIMIT: usize = 4000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Models offered in the settings screen.
pub const KNOWN_MODELS: &[&str] = &[
    "gpt-4",
    "gpt-4-0125-preview",
    "gpt-4-turbo-preview",
    "gpt-3.5-turbo",
];

pub const DEFAULT_SYSTEM_PROMPT_SUMMARY: &str = "Jesteś wnikliwym analitykiem i literatem, który koncentruje się na tworzeniu treści publicystycznych o wysokiej wartości literackiej. Twoim zadaniem jest generowanie zwięzłych, maksymalnie 500-znakowych podsumowań tekstów. Unikaj fraz typu 'artykuł jest o...' lub innych banałów. Stawiaj na przyciągające uwagę, inspirujące i merytoryczne opisy, które zaintrygują czytelnika i wciągną go w treść. Wszystko w języku polskim.";

pub const DEFAULT_USER_PROMPT_SUMMARY: &str = "Na podstawie poniższego tekstu wygeneruj jego podsumowanie, które nie przekracza 500 znaków. Twórz atrakcyjny literacko opis w stylu publicystycznym, unikając wszelkich trywialnych sformułowań. Podsumowanie ma być angażujące, przemyślane i zachęcające do zgłębienia tematu, a jednocześnie precyzyjnie oddawać esencję tekstu.";

pub const DEFAULT_SYSTEM_PROMPT_TITLE: &str = "Jesteś pomocnym asystentem, który generuje chwytliwe i informacyjne tytuły dla artykułów w języku polskim.";

pub const DEFAULT_USER_PROMPT_TITLE: &str = "Wygeneruj chwytliwy i informacyjny tytuł dla tego artykułu w maksymalnie 10 słowach.";

/// Settings read by the pipeline and the summary generator.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub model_id: String,
    pub system_prompt_summary: String,
    pub user_prompt_summary: String,
    pub system_prompt_title: String,
    pub user_prompt_title: String,
    /// Characters of article text sent to the model.
    pub content_truncation_limit: usize,
    /// Upper bound on simultaneous collaborator calls in batch operations.
    pub max_concurrency: usize,
    /// Seconds before a collaborator call is reported as failed.
    pub request_timeout_secs: u64,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL.to_string(),
            system_prompt_summary: DEFAULT_SYSTEM_PROMPT_SUMMARY.to_string(),
            user_prompt_summary: DEFAULT_USER_PROMPT_SUMMARY.to_string(),
            system_prompt_title: DEFAULT_SYSTEM_PROMPT_TITLE.to_string(),
            user_prompt_title: DEFAULT_USER_PROMPT_TITLE.to_string(),
            content_truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NewsletterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Rejects settings the pipeline cannot run with. Unknown model ids are
    /// allowed (compatible endpoints serve other models) but logged.
    pub fn validate(&self) -> Result<()> {
        if self.model_id.trim().is_empty() {
            return Err(Error::Config("model_id must not be empty".to_string()));
        }
        let prompts = [
            ("system_prompt_summary", &self.system_prompt_summary),
            ("user_prompt_summary", &self.user_prompt_summary),
            ("system_prompt_title", &self.system_prompt_title),
            ("user_prompt_title", &self.user_prompt_title),
        ];
        for (name, value) in prompts {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        if self.content_truncation_limit == 0 {
            return Err(Error::Config("content_truncation_limit must be positive".to_string()));
        }
        if self.max_concurrency == 0 {
            return Err(Error::Config("max_concurrency must be positive".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }
        if !KNOWN_MODELS.contains(&self.model_id.as_str()) {
            warn!("⚠️ Model '{}' is not one of the known models {:?}", self.model_id, KNOWN_MODELS);
        }
        Ok(())
    }

    /// Cuts `content` to at most `content_truncation_limit` characters.
    pub fn truncate<'a>(&self, content: &'a str) -> &'a str {
        match content.char_indices().nth(self.content_truncation_limit) {
            Some((idx, _)) => &content[..idx],
            None => content,
        }
    }
}
