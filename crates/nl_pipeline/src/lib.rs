//! The per-article editing session: intake, review, generation and assembly.
//!
//! [`ItemStore`] holds the ordered items and applies state transitions
//! synchronously. [`Pipeline`] owns one store together with the fetcher and
//! generator collaborators and drives the asynchronous operations.

pub mod pipeline;
pub mod report;
pub mod store;

pub use pipeline::Pipeline;
pub use report::BatchReport;
pub use store::ItemStore;

pub mod prelude {
    pub use super::{BatchReport, ItemStore, Pipeline};
    pub use nl_core::{Error, ItemState, ItemView, NewsletterConfig, NewsletterPayload, Result};
}
