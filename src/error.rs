//! Error types for search operations

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during indexing and search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Index initialization failed
    #[error("Index initialization failed: {0}")]
    IndexInit(String),

    /// Schema construction or open mismatch, fatal at startup
    #[error("Schema error: {0}")]
    Schema(String),

    /// A declared content/title/extra field is absent from a fetched row
    #[error("Table '{table}': row is missing declared field '{field}'")]
    MissingField { table: String, field: String },

    /// The id field is absent from a fetched row
    #[error("Table '{table}': row is missing id field '{field}'")]
    MissingId { table: String, field: String },

    /// Malformed query text, surfaced to the caller
    #[error("Query parsing failed: {0}")]
    QueryParse(String),

    /// The relational data source failed to produce rows
    #[error("Row fetch failed: {0}")]
    RowFetch(String),

    /// Failure from the underlying index engine, never retried
    #[error("Search engine error: {0}")]
    Engine(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tantivy::TantivyError> for SearchError {
    fn from(err: tantivy::TantivyError) -> Self {
        SearchError::Engine(err.to_string())
    }
}

impl From<tantivy::query::QueryParserError> for SearchError {
    fn from(err: tantivy::query::QueryParserError) -> Self {
        SearchError::QueryParse(err.to_string())
    }
}
