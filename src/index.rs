//! Search index management

use crate::config::SearchConfig;
use crate::document::{build_search_schema, Document, SchemaFields};
use crate::error::{SearchError, SearchResult};
use std::path::Path;
use std::sync::Arc;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher};
use tokio::sync::RwLock;

/// Manages the Tantivy index: one exclusive writer, many readers.
///
/// The writer handle is owned for the lifetime of the manager; rebuilds
/// bracket their writes with a clear+commit and a final commit so readers
/// only ever observe an empty or a fully populated index.
pub struct IndexManager {
    /// The Tantivy index
    index: Index,

    /// Resolved field handles
    fields: SchemaFields,

    /// Index writer (wrapped in RwLock for thread-safety)
    writer: Arc<RwLock<IndexWriter>>,

    /// Index reader, reloaded explicitly after each build commit
    reader: IndexReader,
}

impl IndexManager {
    /// Open the index at the configured path, creating it if absent.
    pub fn open_or_create(config: &SearchConfig) -> SearchResult<Self> {
        std::fs::create_dir_all(&config.index_path).map_err(|e| {
            SearchError::IndexInit(format!("Failed to create index directory: {}", e))
        })?;

        let index = if Self::index_exists(&config.index_path) {
            Index::open_in_dir(&config.index_path).map_err(|e| {
                SearchError::IndexInit(format!("Failed to open existing index: {}", e))
            })?
        } else {
            Index::create_in_dir(&config.index_path, build_search_schema()).map_err(|e| {
                SearchError::IndexInit(format!("Failed to create new index: {}", e))
            })?
        };

        // An existing index may carry an incompatible schema; resolving the
        // field handles up front makes that a startup failure.
        let fields = SchemaFields::resolve(&index.schema())?;

        let writer = index
            .writer(config.writer_heap_size)
            .map_err(|e| SearchError::IndexInit(format!("Failed to create writer: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::IndexInit(format!("Failed to create reader: {}", e)))?;

        Ok(Self {
            index,
            fields,
            writer: Arc::new(RwLock::new(writer)),
            reader,
        })
    }

    /// Check if an index exists at the given path
    fn index_exists(path: &Path) -> bool {
        path.join("meta.json").exists()
    }

    /// Get the index
    pub fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn fields(&self) -> &SchemaFields {
        &self.fields
    }

    /// Acquire a searcher over the latest reloaded snapshot
    pub fn searcher(&self) -> Searcher {
        self.reader.searcher()
    }

    /// Delete every document and commit the empty state.
    ///
    /// This is the first of the two externally visible state transitions of
    /// a rebuild; the second is the final commit.
    pub async fn clear_all(&self) -> SearchResult<()> {
        let mut writer = self.writer.write().await;
        writer
            .delete_all_documents()
            .map_err(|e| SearchError::Engine(format!("Failed to clear index: {}", e)))?;
        writer
            .commit()
            .map_err(|e| SearchError::Engine(format!("Failed to commit clear: {}", e)))?;
        Ok(())
    }

    /// Buffer one document. Not visible to searchers until [`commit`].
    ///
    /// [`commit`]: IndexManager::commit
    pub async fn add_document(&self, document: &Document) -> SearchResult<()> {
        let doc = document.to_tantivy_doc(&self.fields);
        let writer = self.writer.read().await;
        writer
            .add_document(doc)
            .map_err(|e| SearchError::Engine(format!("Failed to add document: {}", e)))?;
        Ok(())
    }

    /// Commit buffered writes, making them visible to new searchers.
    pub async fn commit(&self) -> SearchResult<()> {
        let mut writer = self.writer.write().await;
        writer
            .commit()
            .map_err(|e| SearchError::Engine(format!("Failed to commit: {}", e)))?;
        Ok(())
    }

    /// Reload the reader onto the latest committed snapshot.
    pub fn reload(&self) -> SearchResult<()> {
        self.reader.reload().map_err(SearchError::from)
    }

    /// Number of documents in the current snapshot
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfigBuilder;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> SearchConfig {
        SearchConfigBuilder::new()
            .index_path(dir.path().to_path_buf())
            .build()
    }

    fn test_document(id: &str) -> Document {
        Document {
            id: format!("task-{id}"),
            table: "task".to_string(),
            name: id.to_string(),
            title: "A title".to_string(),
            content: "some content".to_string(),
            fields: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_open_creates_index() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open_or_create(&test_config(&dir));
        assert!(manager.is_ok());
        assert!(dir.path().join("meta.json").exists());
    }

    #[tokio::test]
    async fn test_reopen_existing_index() {
        let dir = TempDir::new().unwrap();
        {
            let manager = IndexManager::open_or_create(&test_config(&dir)).unwrap();
            manager.add_document(&test_document("T-1")).await.unwrap();
            manager.commit().await.unwrap();
        }
        let manager = IndexManager::open_or_create(&test_config(&dir)).unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.num_docs(), 1);
    }

    #[tokio::test]
    async fn test_uncommitted_documents_are_invisible() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open_or_create(&test_config(&dir)).unwrap();

        manager.add_document(&test_document("T-1")).await.unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.num_docs(), 0);

        manager.commit().await.unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.num_docs(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_commits_empty_state() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open_or_create(&test_config(&dir)).unwrap();

        manager.add_document(&test_document("T-1")).await.unwrap();
        manager.commit().await.unwrap();

        manager.clear_all().await.unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.num_docs(), 0);
    }
}
