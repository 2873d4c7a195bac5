pub mod assembler;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod types;

pub use assembler::{assemble, source_domain, NewsletterEntry, NewsletterPayload};
pub use config::NewsletterConfig;
pub use error::{Error, Result};
pub use fetcher::ContentFetcher;
pub use models::SummaryGenerator;
pub use normalize::normalize;
pub use types::{normalize_url_key, ArticleItem, ItemState, ItemView};

pub mod prelude {
    pub use super::{
        ArticleItem, ContentFetcher, Error, ItemState, ItemView, NewsletterConfig, NewsletterPayload,
        Result, SummaryGenerator,
    };
}
