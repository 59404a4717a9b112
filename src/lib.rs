//! Full-text search layer over heterogeneous relational tables, powered by
//! Tantivy.
//!
//! `tablesearch` turns rows from configured database tables into one
//! canonical document set and answers free-text queries with ranked,
//! highlighted results:
//!
//! - **Ingestion**: each row is normalized into a fixed document schema —
//!   rich-text content fields become plain text, dates become ISO-8601
//!   strings — and the whole index is atomically rebuilt in one pass.
//! - **Query cascade**: per-token exact intersection first, whole-query
//!   parsing when tokens match individually but never co-occur, and a
//!   single fuzzy retry (edit distance 2, prefix-aware) when exact
//!   matching finds nothing.
//! - **Ranking**: results are deduplicated by document address and ordered
//!   by highlight density, title matches before content matches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               SearchService                     │
//! │   build_complete_index()        search()        │
//! └───────────────┬──────────────────────┬──────────┘
//!                 ▼                      ▼
//! ┌──────────────────────────┐ ┌────────────────────┐
//! │  Normalizer + IndexMgr   │ │  Cascade planner   │
//! │  rows → documents        │ │  exact → whole →   │
//! │  clear+commit … commit   │ │  fuzzy, then rank  │
//! └──────────────────────────┘ └────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tablesearch::{
//!     NoProgress, Row, RowSource, SearchConfigBuilder, SearchRequest, SearchResult,
//!     SearchService, TableSpec,
//! };
//!
//! struct Source;
//!
//! impl RowSource for Source {
//!     fn fetch_rows(&self, _table: &str, _fields: &[String]) -> SearchResult<Vec<Row>> {
//!         Ok(vec![Row::new()
//!             .with("name", "TASK-1")
//!             .with("title", "Fix login bug")
//!             .with("description", "<p>Users cannot sign in</p>")])
//!     }
//! }
//!
//! # async fn run() -> SearchResult<()> {
//! let config = SearchConfigBuilder::new()
//!     .index_path("./data/search_index".into())
//!     .build();
//! let tables = vec![TableSpec::new("task")
//!     .with_title_field("title")
//!     .with_content_fields(["description"])];
//!
//! let service = SearchService::new(config, tables)?;
//! service.build_complete_index(&Source, &NoProgress).await?;
//!
//! let response = service.search(&SearchRequest::new("fix bug")).await?;
//! println!("{} results", response.total);
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod error;
mod highlight;
mod index;
mod normalize;
mod progress;
mod query;
mod rank;
mod row;
mod service;
mod table;
mod text;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use document::{build_search_schema, Document};
pub use error::{SearchError, SearchResult};
pub use index::IndexManager;
pub use normalize::normalize_row;
pub use progress::{NoProgress, ProgressReporter, TerminalProgress};
pub use query::{SearchRequest, DEFAULT_PAGE_SIZE};
pub use row::{Row, RowSource, RowValue};
pub use service::{SearchHit, SearchResponse, SearchService};
pub use table::TableSpec;
pub use text::plain_text;
