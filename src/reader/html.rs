// src/reader/html.rs
use std::future::Future;
use std::path::Path;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{number_pages, DocumentReader, PageText};
use crate::utils::error::ReadError;

// --- CSS Selectors (Lazy Static) ---
// Explicit page containers, as produced by most PDF-to-HTML exporters
static PAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".page").expect("Failed to compile PAGE_SELECTOR")
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to compile BODY_SELECTOR")
});

// Block elements that each become their own line(s) of page text
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, pre, blockquote")
        .expect("Failed to compile BLOCK_SELECTOR")
});

const BLOCK_TAGS: [&str; 10] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote"];

/// Reads HTML exports. Each `.page` element is a page; otherwise the whole body is one.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReader;

impl HtmlReader {
    /// Parses an HTML string into page text.
    pub fn parse_pages(html: &str) -> Result<Vec<PageText>, ReadError> {
        let document = Html::parse_document(html);

        let mut page_texts: Vec<String> = document.select(&PAGE_SELECTOR).map(Self::page_text).collect();

        if page_texts.is_empty() {
            let body = document
                .select(&BODY_SELECTOR)
                .next()
                .ok_or_else(|| ReadError::Html("document has no <body>".to_string()))?;
            page_texts.push(Self::page_text(body));
        }

        Ok(number_pages(page_texts.iter().map(String::as_str)))
    }

    /// Lays out one page container: headings and list items on their own line,
    /// paragraphs followed by a blank line.
    fn page_text(page: ElementRef) -> String {
        let mut text = String::new();

        for block in page.select(&BLOCK_SELECTOR) {
            // Nested blocks (a <p> inside an <li>) are covered by the outer one
            if Self::has_block_ancestor(block, page) {
                continue;
            }

            let line = collapse_whitespace(&block.text().collect::<String>());
            if line.is_empty() {
                continue;
            }

            match block.value().name() {
                "li" => {
                    text.push_str("• ");
                    text.push_str(&line);
                    text.push('\n');
                }
                "p" | "pre" | "blockquote" => {
                    text.push_str(&line);
                    text.push_str("\n\n");
                }
                _ => {
                    text.push_str(&line);
                    text.push('\n');
                }
            }
        }

        if text.trim().is_empty() {
            // No block structure, fall back to raw text nodes one per line
            text = page
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
        }

        text
    }

    fn has_block_ancestor(element: ElementRef, page: ElementRef) -> bool {
        for ancestor_node in element.ancestors() {
            if ancestor_node.id() == page.id() {
                break;
            }
            if let Some(ancestor) = ElementRef::wrap(ancestor_node) {
                if BLOCK_TAGS.contains(&ancestor.value().name()) {
                    return true;
                }
            }
        }
        false
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DocumentReader for HtmlReader {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<PageText>, ReadError>> + Send {
        let path = path.to_path_buf();
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ReadError::Io { path: path.clone(), source })?;

            // Html is not Send, so parsing stays out of any await point
            let pages = Self::parse_pages(&content)?;
            tracing::debug!("Parsed {} HTML pages from {}", pages.len(), path.display());
            Ok(pages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_divs_become_pages() {
        let html = r#"
            <html><body>
              <div class="page"><h2>RESULTS AND DISCUSSION</h2><p>The results   were strong.</p></div>
              <div class="page"><ul><li>First point</li><li><p>Second point</p></li></ul></div>
            </body></html>
        "#;
        let pages = HtmlReader::parse_pages(html).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "RESULTS AND DISCUSSION\nThe results were strong.");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "• First point\n• Second point");
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        let html = "<body><p>First paragraph.</p><p>Second paragraph.</p></body>";
        let pages = HtmlReader::parse_pages(html).unwrap();
        assert_eq!(pages[0].text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn unstructured_body_falls_back_to_text_nodes() {
        let html = "<body><div>Loose line one</div><span>Loose line two</span></body>";
        let pages = HtmlReader::parse_pages(html).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Loose line one\nLoose line two");
    }
}
