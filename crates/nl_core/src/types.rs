use serde::{Deserialize, Serialize};
use url::Url;

use crate::normalize::normalize_field;
use crate::{Error, Result};

/// Where an article is in its lifecycle.
///
/// `Finalized` is never stored: it is reported for a `Summarized` item whose
/// title and summary are both present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemState {
    Fetched,
    ContentReady,
    Summarized,
    Finalized,
}

/// One url and the artifacts derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleItem {
    url: String,
    content: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    stage: ItemState,
}

impl ArticleItem {
    /// Creates an item right after its fetch attempt; `None` content means the
    /// fetch failed.
    pub fn new(url: impl Into<String>, content: Option<String>) -> Self {
        Self {
            url: url.into(),
            content,
            title: None,
            summary: None,
            stage: ItemState::Fetched,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn state(&self) -> ItemState {
        if self.stage == ItemState::Summarized && self.is_complete() {
            ItemState::Finalized
        } else {
            self.stage
        }
    }

    /// Both title and summary are present.
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.summary.is_some()
    }

    /// Replaces the article text. An empty string is accepted and means the
    /// operator still has to paste the text.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = Some(text.into());
        self.accept_content();
    }

    /// Moves a freshly fetched item forward once it has content.
    pub fn accept_content(&mut self) {
        if self.stage == ItemState::Fetched && self.content.is_some() {
            self.stage = ItemState::ContentReady;
        }
    }

    /// Content ready to be sent to the generator.
    pub fn content_for_generation(&self) -> Result<&str> {
        match self.content.as_deref() {
            None => Err(Error::invalid_state(&self.url, "article content is missing")),
            Some(text) if text.trim().is_empty() => {
                Err(Error::invalid_state(&self.url, "article content is empty"))
            }
            Some(text) => Ok(text),
        }
    }

    pub fn set_title(&mut self, text: &str) {
        self.title = normalize_field(text);
        self.promote_if_complete();
    }

    pub fn set_summary(&mut self, text: &str) {
        self.summary = normalize_field(text);
        self.promote_if_complete();
    }

    /// Stores a generated title and summary together. Nothing changes unless
    /// both values are non-blank.
    pub fn apply_generated(&mut self, title: &str, summary: &str) -> Result<()> {
        let title = normalize_field(title)
            .ok_or_else(|| Error::Inference("model returned an empty title".to_string()))?;
        let summary = normalize_field(summary)
            .ok_or_else(|| Error::Inference("model returned an empty summary".to_string()))?;
        self.title = Some(title);
        self.summary = Some(summary);
        self.stage = ItemState::Summarized;
        Ok(())
    }

    pub fn view(&self) -> ItemView {
        ItemView {
            url: self.url.clone(),
            content: self.content.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            state: self.state(),
        }
    }

    // Manual authoring on an item whose generation failed.
    fn promote_if_complete(&mut self) {
        if self.stage < ItemState::Summarized && self.is_complete() {
            self.stage = ItemState::Summarized;
        }
    }
}

/// Read-only copy of an item handed to the presentation layer and the
/// assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub url: String,
    pub content: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub state: ItemState,
}

impl ItemView {
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.summary.is_some()
    }
}

/// Turns one intake line into a store key: trimmed, with scheme and host
/// lowercased. Credentials, path, query and fragment keep their bytes. Lines
/// that do not parse as an absolute url with a host are only trimmed. Blank
/// lines yield `None`.
pub fn normalize_url_key(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(lowercase_scheme_and_host(trimmed).unwrap_or_else(|| trimmed.to_string()))
}

fn lowercase_scheme_and_host(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed.host_str()?;

    let scheme = raw.get(..parsed.scheme().len())?;
    if !scheme.eq_ignore_ascii_case(parsed.scheme()) {
        return None;
    }
    let after_scheme = raw[scheme.len()..].strip_prefix("://")?;
    let authority_end = after_scheme
        .find(['/', '?', '#', '\\'])
        .unwrap_or(after_scheme.len());
    let (authority, rest) = after_scheme.split_at(authority_end);
    let (userinfo, host) = match authority.rfind('@') {
        Some(at) => authority.split_at(at + 1),
        None => ("", authority),
    };

    Some(format!(
        "{}://{}{}{}",
        parsed.scheme(),
        userinfo,
        host.to_lowercase(),
        rest
    ))
}
