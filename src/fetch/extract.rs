use std::sync::LazyLock;

use scraper::{Html, Selector};

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector is valid"));

/// Returns the text of every `<p>` element, in document order, joined by a space.
///
/// Whitespace inside a paragraph is collapsed and paragraphs with no text are
/// skipped, so a page without paragraphs yields an empty string.
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&PARAGRAPH)
        .map(|p| {
            p.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
