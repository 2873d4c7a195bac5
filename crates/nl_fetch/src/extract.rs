use nl_core::{Error, Result};
use scraper::{Html, Selector};

/// Elements whose text never belongs to the article body.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Returns the text of the first `<article>` element in `html`.
///
/// Text nodes are trimmed and joined with single spaces; script and style
/// contents are skipped.
pub fn extract_article_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = parse_selector("article")?;

    let article = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::Scraping("no article element found".to_string()))?;

    let parts: Vec<&str> = article
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if skipped {
                return None;
            }
            let text = text.trim();
            (!text.is_empty()).then_some(text)
        })
        .collect();

    Ok(parts.join(" "))
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))
}
