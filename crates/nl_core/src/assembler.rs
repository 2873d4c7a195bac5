//! Turns finalized items into the ordered newsletter payload.
//!
//! The payload is the whole contract with renderers: they never look at
//! items directly.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::normalize::normalize;
use crate::types::ItemView;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterEntry {
    /// 1-based position in the newsletter.
    pub position: usize,
    pub total: usize,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source_domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPayload {
    pub total: usize,
    pub entries: Vec<NewsletterEntry>,
}

/// Builds the payload from a snapshot, preserving its order.
///
/// Fails with [`Error::IncompleteItems`] listing every item that lacks a title
/// or summary; no partial newsletter is produced.
pub fn assemble(snapshot: &[ItemView]) -> Result<NewsletterPayload> {
    let total = snapshot.len();
    let mut entries = Vec::with_capacity(total);
    let mut missing = Vec::new();

    for (idx, item) in snapshot.iter().enumerate() {
        match (item.title.as_deref(), item.summary.as_deref()) {
            (Some(title), Some(summary)) => entries.push(NewsletterEntry {
                position: idx + 1,
                total,
                title: normalize(title),
                summary: normalize(summary),
                url: item.url.clone(),
                source_domain: source_domain(&item.url),
            }),
            _ => missing.push(item.url.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(Error::IncompleteItems { urls: missing });
    }
    Ok(NewsletterPayload { total, entries })
}

/// Host part of `url` without scheme, credentials, port or path. Urls typed
/// without a scheme are read as `http://`; anything unparseable yields an
/// empty string.
pub fn source_domain(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", url)).ok(),
        Err(_) => None,
    };
    parsed
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
