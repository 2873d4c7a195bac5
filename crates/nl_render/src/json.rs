use nl_core::{NewsletterPayload, Result};

use crate::Renderer;

/// The payload itself, for hand-off to an external templating step.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, payload: &NewsletterPayload) -> Result<String> {
        Ok(serde_json::to_string_pretty(payload)?)
    }
}
