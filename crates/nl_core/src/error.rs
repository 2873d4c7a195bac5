use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unknown article: {url}")]
    NotFound { url: String },

    #[error("Invalid state for {url}: {reason}")]
    InvalidState { url: String, reason: String },

    #[error("Failed to fetch {url}: {source}")]
    FetchFailure {
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to generate title/summary for {url}: {source}")]
    GenerationFailure {
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Missing title or summary for: {}", .urls.join(", "))]
    IncompleteItems { urls: Vec<String> },

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    pub fn invalid_state(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn fetch_failure(url: impl Into<String>, source: Error) -> Self {
        Self::FetchFailure {
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub fn generation_failure(url: impl Into<String>, source: Error) -> Self {
        Self::GenerationFailure {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// The article url this error is scoped to, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::NotFound { url }
            | Error::InvalidState { url, .. }
            | Error::FetchFailure { url, .. }
            | Error::GenerationFailure { url, .. } => Some(url),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_errors_carry_url() {
        let err = Error::generation_failure("https://a.example/x", Error::Inference("boom".into()));
        assert_eq!(err.url(), Some("https://a.example/x"));
        assert_eq!(
            err.to_string(),
            "Failed to generate title/summary for https://a.example/x: Inference error: boom"
        );

        let err = Error::Config("bad".into());
        assert_eq!(err.url(), None);
    }

    #[test]
    fn test_incomplete_items_lists_every_url() {
        let err = Error::IncompleteItems {
            urls: vec!["https://a.example/x".into(), "https://b.example/y".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing title or summary for: https://a.example/x, https://b.example/y"
        );
    }
}
