//! Rich-text normalization for operator-edited titles and summaries.
//!
//! The editor wraps every value in a paragraph, so `"Breaking News"` comes back
//! as `"<p>Breaking News</p>"`. [`normalize`] strips that wrapper when it is the
//! only paragraph in the value and leaves every other markup untouched.

const OPEN: &str = "<p>";
const CLOSE: &str = "</p>";

/// Markup the editor emits for an empty document once the wrapper is gone.
const EMPTY_MARKERS: &[&str] = &["", "<br>", "<br/>", "<br />"];

/// Strips a single redundant wrapping `<p>...</p>` and surrounding whitespace.
///
/// The wrapper is only removed when the inner text contains no other paragraph
/// tag, so `"<p>a</p><p>b</p>"` is kept intact. Idempotent:
/// `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.len() >= OPEN.len() + CLOSE.len()
        && trimmed.starts_with(OPEN)
        && trimmed.ends_with(CLOSE)
    {
        let inner = &trimmed[OPEN.len()..trimmed.len() - CLOSE.len()];
        if !contains_paragraph_tag(inner) {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// True when a normalized value carries no visible text.
pub fn is_blank(normalized: &str) -> bool {
    EMPTY_MARKERS.contains(&normalized.trim())
}

/// Normalizes `input`, mapping blank results to `None`.
pub fn normalize_field(input: &str) -> Option<String> {
    let normalized = normalize(input);
    if is_blank(&normalized) {
        None
    } else {
        Some(normalized)
    }
}

fn contains_paragraph_tag(text: &str) -> bool {
    text.contains(CLOSE) || text.contains("<p>") || text.contains("<p ")
}
