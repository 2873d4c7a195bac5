use nl_core::{NewsletterPayload, Result};

use crate::Renderer;

/// Plain-text preview, one block per entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, payload: &NewsletterPayload) -> Result<String> {
        let blocks: Vec<String> = payload
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "[{}/{}] {}\n\n{}\n\n{} ({})\n",
                    entry.position, entry.total, entry.title, entry.summary, entry.url, entry.source_domain
                )
            })
            .collect();
        Ok(blocks.join("\n---\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_core::NewsletterEntry;

    #[test]
    fn test_text_blocks() {
        let payload = NewsletterPayload {
            total: 2,
            entries: (1..=2)
                .map(|i| NewsletterEntry {
                    position: i,
                    total: 2,
                    title: format!("T{}", i),
                    summary: format!("S{}", i),
                    url: format!("https://a.example/{}", i),
                    source_domain: "a.example".into(),
                })
                .collect(),
        };
        let text = TextRenderer.render(&payload).unwrap();
        assert!(text.starts_with("[1/2] T1\n\nS1\n\nhttps://a.example/1 (a.example)\n"));
        assert!(text.contains("\n---\n\n[2/2] T2"));
        assert_eq!(TextRenderer.render(&NewsletterPayload { total: 0, entries: vec![] }).unwrap(), "");
    }
}
