//! Rich-text to plain-text conversion
//!
//! Content fields may hold HTML rich text. Before indexing, markup is
//! stripped so the engine tokenizes only visible text.

use scraper::Html;

/// Convert a raw field value to plain text, discarding markup.
///
/// Plain input without markup passes through unchanged apart from
/// whitespace normalisation.
pub fn plain_text(raw: &str) -> String {
    if !raw.contains('<') {
        return normalise_whitespace(raw);
    }

    let fragment = Html::parse_fragment(raw);
    // Join text nodes with a space so adjacent block elements do not glue
    // their words together; normalisation collapses any doubled gaps.
    let text = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    normalise_whitespace(&text)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
