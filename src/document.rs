//! Canonical search documents and the index schema

use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tantivy::schema::{
    Field, IndexRecordOption, OwnedValue, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
    TEXT,
};
use tantivy::TantivyDocument;

/// The canonical unit stored in the index. Documents are created only
/// during a full rebuild and never individually mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Globally unique id, derived from table name and record id
    pub id: String,

    /// Source table name
    pub table: String,

    /// The record's own identifier (unique within its table only)
    pub name: String,

    /// Plain title, may be empty
    pub title: String,

    /// Content fields converted to plain text and joined by the
    /// configured separator, in declared order
    pub content: String,

    /// Extra metadata stored on the document but not full-text searched.
    /// Dates are already normalized to ISO-8601 strings.
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub(crate) fn to_tantivy_doc(&self, fields: &SchemaFields) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(fields.id, &self.id);
        doc.add_text(fields.table, &self.table);
        doc.add_text(fields.name, &self.name);
        doc.add_text(fields.title, &self.title);
        doc.add_text(fields.content, &self.content);

        let object: BTreeMap<String, OwnedValue> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), OwnedValue::from(value.clone())))
            .collect();
        doc.add_object(fields.extra, object);

        doc
    }
}

/// Build the index schema.
///
/// Title and content use the English stemming tokenizer so queries match
/// across inflected forms; id, table and name are stored verbatim.
pub fn build_search_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    let stemmed = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("en_stem")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();

    schema_builder.add_text_field("id", STRING | STORED);
    schema_builder.add_text_field("table", STRING | STORED);
    schema_builder.add_text_field("name", TEXT | STORED);
    schema_builder.add_text_field("title", stemmed.clone());
    schema_builder.add_text_field("content", stemmed);
    schema_builder.add_json_field("fields", STORED);

    schema_builder.build()
}

/// Resolved field handles for the search schema.
///
/// Resolution happens once at startup; a missing field means the on-disk
/// index was built against an incompatible schema and is fatal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaFields {
    pub id: Field,
    pub table: Field,
    pub name: Field,
    pub title: Field,
    pub content: Field,
    pub extra: Field,
}

impl SchemaFields {
    pub fn resolve(schema: &Schema) -> SearchResult<Self> {
        let get = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| SearchError::Schema(format!("index schema is missing field '{name}'")))
        };

        Ok(Self {
            id: get("id")?,
            table: get("table")?,
            name: get("name")?,
            title: get("title")?,
            content: get("content")?,
            extra: get("fields")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::Document as _;

    #[test]
    fn test_schema_resolves() {
        let schema = build_search_schema();
        assert!(SchemaFields::resolve(&schema).is_ok());
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let mut builder = Schema::builder();
        builder.add_text_field("id", STRING | STORED);
        let schema = builder.build();

        let err = SchemaFields::resolve(&schema).unwrap_err();
        assert!(matches!(err, SearchError::Schema(_)));
    }

    #[test]
    fn test_to_tantivy_doc_round_trip() {
        let schema = build_search_schema();
        let fields = SchemaFields::resolve(&schema).unwrap();

        let mut extra = serde_json::Map::new();
        extra.insert("due_date".to_string(), serde_json::json!("2024-03-01T12:30:00Z"));

        let document = Document {
            id: "task-TASK-1".to_string(),
            table: "task".to_string(),
            name: "TASK-1".to_string(),
            title: "Fix login bug".to_string(),
            content: "Users cannot sign in".to_string(),
            fields: extra,
        };

        let doc = document.to_tantivy_doc(&fields);
        let named = doc.to_named_doc(&schema);
        let json = serde_json::to_value(&named).unwrap();

        assert_eq!(json["id"][0], "task-TASK-1");
        assert_eq!(json["title"][0], "Fix login bug");
        assert_eq!(json["fields"][0]["due_date"], "2024-03-01T12:30:00Z");
    }
}
