//! Renderers turn a [`NewsletterPayload`] into a document. They never see
//! pipeline items, only the assembled payload.

use nl_core::{NewsletterPayload, Result};

pub mod html;
pub mod json;
pub mod text;

pub use html::{EmailHtmlRenderer, Labels};
pub use json::JsonRenderer;
pub use text::TextRenderer;

pub trait Renderer {
    fn render(&self, payload: &NewsletterPayload) -> Result<String>;
}
