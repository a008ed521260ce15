//! HTML parser for building the extraction corpus
//!
//! This module turns a fetched page into:
//! - The page title
//! - A text corpus of every visible text node, one node per line

use scraper::{Html, Node, Selector};

/// Elements whose text never reaches the corpus
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "title"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Title followed by the visible text nodes, newline separated
    pub corpus: String,
}

/// Parses HTML content into a title and text corpus
///
/// html5ever recovers from any malformed input, so this never fails; an
/// unparseable page simply yields an empty corpus.
///
/// # Example
///
/// ```
/// use contact_crawler::crawler::parse_page;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>mail: a@b.com</p></body></html>"#;
/// let parsed = parse_page(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.corpus, "Test\nmail: a@b.com");
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);

    let mut lines: Vec<String> = Vec::new();
    if let Some(title) = &title {
        lines.push(title.clone());
    }

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|element| HIDDEN_ELEMENTS.contains(&element.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    ParsedPage {
        title,
        corpus: lines.join("\n"),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .replace(['\r', '\n'], " ")
                .trim()
                .to_string()
        })
        .filter(|s| !s.is_empty())
}
