use std::fmt::Write;

use nl_core::{NewsletterEntry, NewsletterPayload, Result};
use tracing::debug;

use crate::Renderer;

/// Fixed texts of an entry block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub read_more: String,
    pub source: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            read_more: "Przejdź do artykułu".to_string(),
            source: "Źródło".to_string(),
        }
    }
}

/// Table-based markup for email editors: one 600px content body, one row per
/// entry.
///
/// Titles and summaries are editor rich text and go in as-is. Urls, domains
/// and labels are escaped.
#[derive(Debug, Default, Clone)]
pub struct EmailHtmlRenderer {
    labels: Labels,
}

impl EmailHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: Labels) -> Self {
        Self { labels }
    }

    fn write_entry(&self, out: &mut String, entry: &NewsletterEntry) -> std::fmt::Result {
        let url = escape(&entry.url);
        let domain = escape(&entry.source_domain);
        let read_more = escape(&self.labels.read_more);
        let source = escape(&self.labels.source);

        write!(
            out,
            r##"
<tr>
  <td align="left" class="es-p20t es-p20r es-p20l esd-structure">
  <table cellpadding="0" cellspacing="0" align="right" class="es-right">
    <tbody>
      <tr>
        <td width="560" align="left" class="es-m-p20b esd-container-frame">
          <table cellpadding="0" cellspacing="0" width="100%">
            <tbody>
              <tr>
                <td align="center" class="esd-block-text">
                  <p style="font-size:12px">
                    <em>{position}/{total}</em>
                  </p>
                </td>
              </tr>
              <tr>
                <td align="left" class="esd-block-text es-p10t es-p10b">
                  <h3 class="b_title" style="font-size:25px;line-height:100%;font-family:georgia,times,&#39;times new roman&#39;,serif">
                    {title}
                  </h3>
                </td>
              </tr>
              <tr>
                <td align="left" class="esd-block-text es-m-p10b">
                  <p class="b_description es-m-txt-l" style="font-size:14px;line-height:150%">
                    {summary}
                  </p>
                </td>
              </tr>
              <tr>
                <td align="right" class="esd-block-button">
                  <span class="es-button-border es-m-il es-button-border-7748" style="background:#fad02c;border:1px solid #fad02c">
                    <a href="{url}" target="_blank" class="es-button es-button-7808" style="font-size:14px;font-family:arial,&#39;helvetica neue&#39;,helvetica,sans-serif;background:#fad02c;mso-border-alt:10px solid #fad02c;font-weight:bold">
                      {read_more}
                    </a>
                  </span>
                </td>
              </tr>
              <tr>
                <td align="left" class="esd-block-text es-p5t es-text-9242">
                  <p class="b_description es-text-mobile-size-14 es-m-txt-l" style="font-size:14px;line-height:150%;color:#999999">
                    <em>{source}: {domain}</em>
                  </p>
                </td>
              </tr>
              <tr>
                <td align="center" class="esd-block-spacer es-p20" style="font-size:0">
                  <table cellpadding="0" cellspacing="0" border="0" width="100%" height="100%" class="es-spacer">
                    <tbody>
                      <tr>
                        <td style="width:100%;margin:0px 0px 0px 0px;border-bottom:1px solid #cccccc;background:none;height:1px"></td>
                      </tr>
                    </tbody>
                  </table>
                </td>
              </tr>
            </tbody>
          </table>
        </td>
      </tr>
    </tbody>
  </table>
</td>
</tr>
"##,
            position = entry.position,
            total = entry.total,
            title = entry.title,
            summary = entry.summary,
        )
    }
}

impl Renderer for EmailHtmlRenderer {
    fn render(&self, payload: &NewsletterPayload) -> Result<String> {
        let mut rows = String::new();
        for entry in &payload.entries {
            self.write_entry(&mut rows, entry)
                .map_err(|e| nl_core::Error::External(e.into()))?;
        }
        debug!("Rendered {} entries as email HTML", payload.entries.len());

        Ok(format!(
            r##"<td align="center" class="esd-stripe">
  <table bgcolor="#ffffff" align="center" cellpadding="0" cellspacing="0" width="600" class="es-content-body">
    <tbody>{rows}
    </tbody>
  </table>
</td>
"##
        ))
    }
}

/// Escapes text for use in element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(position: usize, total: usize, url: &str, domain: &str) -> NewsletterEntry {
        NewsletterEntry {
            position,
            total,
            title: format!("Title {}", position),
            summary: format!("Summary <strong>{}</strong>", position),
            url: url.to_string(),
            source_domain: domain.to_string(),
        }
    }

    #[test]
    fn test_renders_entries_in_order() {
        let payload = NewsletterPayload {
            total: 2,
            entries: vec![
                entry(1, 2, "https://a.example/x", "a.example"),
                entry(2, 2, "https://b.example/y", "b.example"),
            ],
        };
        let html = EmailHtmlRenderer::new().render(&payload).unwrap();

        assert!(html.starts_with(r#"<td align="center" class="esd-stripe">"#));
        assert!(html.contains(r#"width="600" class="es-content-body""#));
        assert!(html.contains("<em>1/2</em>"));
        assert!(html.contains("<em>2/2</em>"));
        assert!(html.find("Title 1").unwrap() < html.find("Title 2").unwrap());
        assert!(html.contains(r#"<a href="https://b.example/y" target="_blank""#));
        assert!(html.contains("Przejdź do artykułu"));
        assert!(html.contains("<em>Źródło: a.example</em>"));
        // summaries are rich text
        assert!(html.contains("Summary <strong>1</strong>"));
        assert_eq!(html.matches("esd-block-spacer").count(), 2);
    }

    #[test]
    fn test_escapes_url_and_labels() {
        let payload = NewsletterPayload {
            total: 1,
            entries: vec![entry(1, 1, "https://a.example/?q=\"x\"&y=<1>", "a.example")],
        };
        let labels = Labels {
            read_more: "Read <more>".to_string(),
            source: "Source".to_string(),
        };
        let html = EmailHtmlRenderer::with_labels(labels).render(&payload).unwrap();

        assert!(html.contains(r#"href="https://a.example/?q=&quot;x&quot;&amp;y=&lt;1&gt;""#));
        assert!(html.contains("Read &lt;more&gt;"));
        assert!(html.contains("<em>Source: a.example</em>"));
    }

    #[test]
    fn test_empty_payload() {
        let payload = NewsletterPayload { total: 0, entries: vec![] };
        let html = EmailHtmlRenderer::new().render(&payload).unwrap();
        assert!(html.contains("<tbody>\n    </tbody>"));
        assert!(!html.contains("esd-structure"));
    }
}
