//! Snippet generation and highlight counting
//!
//! Wraps the engine's snippet generator to produce marked-up title and
//! content fragments per document. The per-field highlight counts are the
//! sole ranking signal.

use crate::document::SchemaFields;
use crate::error::SearchResult;
use crate::service::SearchHit;
use tantivy::query::Query;
use tantivy::schema::{Field, Schema, Value};
use tantivy::snippet::SnippetGenerator;
use tantivy::Document as _;
use tantivy::{DocAddress, Searcher, TantivyDocument};

/// Build highlighted hits for a set of document addresses.
///
/// The engine emits `<b>` spans; they are rewritten to the semantic
/// `<mark>` element for display.
pub(crate) fn highlight_addresses(
    searcher: &Searcher,
    query: &dyn Query,
    schema: &Schema,
    fields: &SchemaFields,
    addresses: &[DocAddress],
) -> SearchResult<Vec<SearchHit>> {
    if addresses.is_empty() {
        return Ok(Vec::new());
    }

    let title_generator = SnippetGenerator::create(searcher, query, fields.title)?;
    let content_generator = SnippetGenerator::create(searcher, query, fields.content)?;

    let mut hits = Vec::with_capacity(addresses.len());
    for &address in addresses {
        let doc: TantivyDocument = searcher.doc(address)?;

        let title_snippet = title_generator.snippet_from_doc(&doc);
        let content_snippet = content_generator.snippet_from_doc(&doc);

        hits.push(SearchHit {
            id: text_value(&doc, fields.id),
            name: text_value(&doc, fields.name),
            title: text_value(&doc, fields.title),
            content: text_value(&doc, fields.content),
            table: text_value(&doc, fields.table),
            highlighted_title: mark_spans(&title_snippet.to_html()),
            highlighted_content: mark_spans(&content_snippet.to_html()),
            title_highlight_count: title_snippet.highlighted().len(),
            content_highlight_count: content_snippet.highlighted().len(),
            fields: extra_fields(&doc, schema),
            address: (address.segment_ord, address.doc_id),
        });
    }

    Ok(hits)
}

/// Get text field value from document
fn text_value(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Get the stored extra-fields object from a document
fn extra_fields(
    doc: &TantivyDocument,
    schema: &Schema,
) -> serde_json::Map<String, serde_json::Value> {
    serde_json::to_value(doc.to_named_doc(schema))
        .ok()
        .and_then(|named| named.get("fields").and_then(|values| values.get(0)).cloned())
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

/// Rewrite the engine's default bold spans to semantic emphasis markers
fn mark_spans(html: &str) -> String {
    html.replace("<b>", "<mark>").replace("</b>", "</mark>")
}
