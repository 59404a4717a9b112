//! Per-table indexing configuration

use serde::{Deserialize, Serialize};

/// Configuration for one indexable table. Immutable for the lifetime of a
/// build; tables are processed in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    /// Source table name
    pub table: String,

    /// Fields concatenated into the document body, in declared order.
    /// Order is significant: it determines the text proximity seen by the
    /// engine's tokenizer and must be stable across runs.
    pub content_fields: Vec<String>,

    /// Optional field providing the document title
    pub title_field: Option<String>,

    /// Structured metadata fields stored on the document but not
    /// full-text searched
    pub extra_fields: Vec<String>,
}

impl TableSpec {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            content_fields: Vec::new(),
            title_field: None,
            extra_fields: Vec::new(),
        }
    }

    pub fn with_content_fields(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.content_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title_field(mut self, field: impl Into<String>) -> Self {
        self.title_field = Some(field.into());
        self
    }

    pub fn with_extra_fields(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.extra_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// The exact field list requested from the data source for this table:
    /// title, content fields, extra fields, then the id field.
    pub(crate) fn requested_fields(&self, id_field: &str) -> Vec<String> {
        let mut fields = Vec::with_capacity(
            self.content_fields.len() + self.extra_fields.len() + 2,
        );
        if let Some(title) = &self.title_field {
            fields.push(title.clone());
        }
        fields.extend(self.content_fields.iter().cloned());
        fields.extend(self.extra_fields.iter().cloned());
        fields.push(id_field.to_string());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_fields_order() {
        let spec = TableSpec::new("task")
            .with_title_field("title")
            .with_content_fields(["description", "notes"])
            .with_extra_fields(["due_date"]);

        assert_eq!(
            spec.requested_fields("name"),
            vec!["title", "description", "notes", "due_date", "name"]
        );
    }

    #[test]
    fn test_requested_fields_without_title() {
        let spec = TableSpec::new("comment").with_content_fields(["body"]);
        assert_eq!(spec.requested_fields("name"), vec!["body", "name"]);
    }
}
