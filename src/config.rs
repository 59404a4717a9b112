//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Path to the search index directory
    pub index_path: PathBuf,

    /// Name of the unique-identifier field present in every table
    pub id_field: String,

    /// Separator joining converted content fields into one document body.
    ///
    /// Known limitation: the separator is a plain string with no escaping.
    /// If field text itself contains the separator, highlight and field
    /// boundaries become ambiguous.
    pub separator: String,

    /// Index writer heap size in bytes (default: 50MB)
    pub writer_heap_size: usize,

    /// Maximum matches retrieved per query token during the
    /// exact-intersection stage
    pub per_token_match_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./data/search_index"),
            id_field: "name".to_string(),
            separator: "|||".to_string(),
            writer_heap_size: 50_000_000, // 50MB
            per_token_match_cap: 1000,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn index_path(mut self, path: PathBuf) -> Self {
        self.config.index_path = path;
        self
    }

    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.config.id_field = field.into();
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    pub fn writer_heap_size(mut self, size: usize) -> Self {
        self.config.writer_heap_size = size;
        self
    }

    pub fn per_token_match_cap(mut self, cap: usize) -> Self {
        self.config.per_token_match_cap = cap;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.id_field, "name");
        assert_eq!(config.separator, "|||");
        assert_eq!(config.per_token_match_cap, 1000);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfigBuilder::new()
            .index_path(PathBuf::from("/tmp/idx"))
            .id_field("pk")
            .separator(" :: ")
            .per_token_match_cap(500)
            .build();

        assert_eq!(config.index_path, PathBuf::from("/tmp/idx"));
        assert_eq!(config.id_field, "pk");
        assert_eq!(config.separator, " :: ");
        assert_eq!(config.per_token_match_cap, 500);
    }
}
