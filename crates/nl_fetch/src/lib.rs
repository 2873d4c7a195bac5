pub mod extract;
pub mod http;

pub use extract::extract_article_text;
pub use http::{HttpFetcher, HttpFetcherConfig};

pub mod prelude {
    pub use super::http::HttpFetcher;
    pub use nl_core::{ContentFetcher, Error, Result};
}
