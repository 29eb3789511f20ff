//! Article body extraction.
//!
//! Article pages are reduced to their content-looking lines: the document's
//! visible text is linearized, split into lines, and every line with more than
//! [`MIN_TOKENS`] whitespace-separated tokens is kept. Navigation entries,
//! captions and tag lists tend to be short and fall out; so do very short
//! genuine sentences.

use crate::error::Result;
use crate::http::Fetcher;
use scraper::{Html, Node};
use tracing::{debug, instrument};

/// A line needs strictly more tokens than this to count as content.
pub const MIN_TOKENS: usize = 3;

/// Characters that end a line of page text: ASCII line and record separators
/// plus NEL and the Unicode line and paragraph separators. `\r\n` splits
/// twice, which only adds an empty line.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Whether a line of page text looks like article content.
pub fn is_content_line(line: &str) -> bool {
    line.split_whitespace().count() > MIN_TOKENS
}

/// All visible text of a document, in document order.
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.root_element().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| HIDDEN_ELEMENTS.contains(&name));
        if !hidden {
            text.push_str(chunk);
        }
    }
    text
}

/// Keep the content lines of `text`, each followed by a newline.
pub fn clean_text(text: &str) -> String {
    let mut output = String::new();
    for line in text.split(LINE_BREAKS).filter(|line| is_content_line(line)) {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Cleaned body text of an HTML page.
pub fn extract_body(html: &str) -> String {
    let document = Html::parse_document(html);
    clean_text(&visible_text(&document))
}

/// Fetch an article page and return its cleaned body text.
#[instrument(level = "debug", skip(fetcher))]
pub async fn fetch_article_body<F: Fetcher>(fetcher: &F, url: &str) -> Result<String> {
    let html = fetcher.fetch(url).await?;
    let body = extract_body(&html);
    debug!(bytes = body.len(), "Extracted article body");
    Ok(body)
}
