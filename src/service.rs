//! Main search service implementation

use crate::config::SearchConfig;
use crate::error::SearchResult;
use crate::index::IndexManager;
use crate::normalize::normalize_row;
use crate::progress::ProgressReporter;
use crate::query::{CascadePlanner, SearchRequest};
use crate::row::RowSource;
use crate::table::TableSpec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// A single search result hit, constructed per query and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Globally unique document id (`{table}-{record id}`)
    pub id: String,

    /// The record's own identifier
    pub name: String,

    /// Plain title
    pub title: String,

    /// Plain content body
    pub content: String,

    /// Source table name
    pub table: String,

    /// Title fragment with matches wrapped in `<mark>` spans
    pub highlighted_title: String,

    /// Content fragment with matches wrapped in `<mark>` spans
    pub highlighted_content: String,

    /// Number of highlighted spans in the title
    pub title_highlight_count: usize,

    /// Number of highlighted spans in the content
    pub content_highlight_count: usize,

    /// Stored extra metadata, dates as ISO-8601 strings
    pub fields: serde_json::Map<String, serde_json::Value>,

    /// Engine-assigned (segment, offset) address, stable only within one
    /// committed snapshot
    pub address: (u32, u32),
}

/// Search response with ranked results and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked results, at most the requested page size
    pub results: Vec<SearchHit>,

    /// Count of results actually returned (post-truncation)
    pub total: usize,

    /// Query execution time in milliseconds
    pub duration_ms: u64,
}

/// Search layer over a relational data source and the index engine.
///
/// Owns the index's single writer handle for its lifetime: one service
/// instance builds, any number of concurrent callers search.
pub struct SearchService {
    /// Index manager
    index: IndexManager,

    /// Configuration
    config: SearchConfig,

    /// Indexable tables, processed in registration order
    tables: Vec<TableSpec>,
}

impl SearchService {
    /// Open or create the index and set up the service
    pub fn new(config: SearchConfig, tables: Vec<TableSpec>) -> SearchResult<Self> {
        let index = IndexManager::open_or_create(&config)?;
        Ok(Self {
            index,
            config,
            tables,
        })
    }

    /// Rebuild the entire index from the data source.
    ///
    /// Clears all existing documents and commits the empty state, then
    /// normalizes every row of every configured table into the write
    /// buffer and commits once at the end. Readers only ever observe the
    /// empty or the fully populated index. Any row failure aborts the
    /// build before the final commit; there is no per-row recovery, so a
    /// half-covered index can never become visible.
    ///
    /// Returns the number of records indexed.
    pub async fn build_complete_index(
        &self,
        source: &dyn RowSource,
        progress: &dyn ProgressReporter,
    ) -> SearchResult<usize> {
        self.index.clear_all().await?;

        let total_tables = self.tables.len();
        let mut record_count = 0usize;
        progress.begin("Indexing", total_tables as u64);

        for (position, spec) in self.tables.iter().enumerate() {
            debug!(table = %spec.table, "indexing table");

            let field_list = spec.requested_fields(&self.config.id_field);
            let rows = source.fetch_rows(&spec.table, &field_list)?;

            for row in &rows {
                let document =
                    normalize_row(row, spec, &self.config.id_field, &self.config.separator)?;
                self.index.add_document(&document).await?;
                record_count += 1;
            }

            progress.advance(position as u64 + 1);
        }

        self.index.commit().await?;
        self.index.reload()?;
        progress.finish();

        info!(records = record_count, tables = total_tables, "index rebuild complete");
        Ok(record_count)
    }

    /// Answer a free-text query with ranked, highlighted results.
    ///
    /// Runs the cascade in exact mode first and retries exactly once in
    /// fuzzy mode when exact matching yields nothing. A request that asks
    /// for fuzzy up front runs fuzzy only.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let start_time = Instant::now();

        let searcher = self.index.searcher();
        let planner = CascadePlanner::new(
            self.index.index(),
            self.index.fields(),
            self.config.per_token_match_cap,
        );

        let levels: &[bool] = if request.fuzzy {
            &[true]
        } else {
            &[false, true]
        };

        let mut results = Vec::new();
        for &fuzzy in levels {
            results = planner.run(&searcher, &request.query, request.limit, fuzzy)?;
            if !results.is_empty() {
                break;
            }
            debug!(query = %request.query, fuzzy, "cascade level exhausted");
        }

        let total = results.len();
        Ok(SearchResponse {
            results,
            total,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Number of documents in the current committed snapshot
    pub fn num_docs(&self) -> u64 {
        self.index.num_docs()
    }
}
