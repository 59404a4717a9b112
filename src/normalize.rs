//! Document normalization
//!
//! Maps one raw row plus a table's field spec into a canonical
//! [`Document`]. Pure transformation: the input row is never mutated and
//! the same row always yields the same document.

use crate::document::Document;
use crate::error::{SearchError, SearchResult};
use crate::row::Row;
use crate::table::TableSpec;
use crate::text::plain_text;

/// Normalize one row into a document.
///
/// The document id is derived as `{table}-{record_id}` and is the natural
/// key for replace semantics across rebuilds. Date-valued extra fields are
/// converted to ISO-8601 strings; content fields are converted to plain
/// text independently and joined by `separator` in declared order.
pub fn normalize_row(
    row: &Row,
    spec: &TableSpec,
    id_field: &str,
    separator: &str,
) -> SearchResult<Document> {
    let record_id = row
        .get(id_field)
        .ok_or_else(|| SearchError::MissingId {
            table: spec.table.clone(),
            field: id_field.to_string(),
        })?
        .as_text();

    let title = match &spec.title_field {
        Some(field) => require(row, spec, field)?.as_text(),
        None => String::new(),
    };

    let mut fields = serde_json::Map::new();
    for field in &spec.extra_fields {
        fields.insert(field.clone(), require(row, spec, field)?.to_json());
    }

    let mut parts = Vec::with_capacity(spec.content_fields.len());
    for field in &spec.content_fields {
        parts.push(plain_text(&require(row, spec, field)?.as_text()));
    }

    Ok(Document {
        id: format!("{}-{}", spec.table, record_id),
        table: spec.table.clone(),
        name: record_id,
        title,
        content: parts.join(separator),
        fields,
    })
}

fn require<'a>(
    row: &'a Row,
    spec: &TableSpec,
    field: &str,
) -> SearchResult<&'a crate::row::RowValue> {
    row.get(field).ok_or_else(|| SearchError::MissingField {
        table: spec.table.clone(),
        field: field.to_string(),
    })
}
