//! Query requests and the cascade planner
//!
//! A query resolves through up to three stages: per-token exact
//! intersection, whole-query fallback when tokens match individually but
//! never co-occur, and a single fuzzy retry of both when exact matching
//! finds nothing. The escalation is an explicit loop, not recursion, so
//! the policy is auditable in one place.

use crate::document::SchemaFields;
use crate::error::SearchResult;
use crate::highlight::highlight_addresses;
use crate::rank::rank;
use crate::service::SearchHit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::schema::Schema;
use tantivy::{DocAddress, Index, Searcher};
use tracing::debug;

/// Default result page size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Maximum edit distance for fuzzy matching
const FUZZY_DISTANCE: u8 = 2;

/// A search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-form query text, split on whitespace into tokens
    pub query: String,

    /// Requested result page size
    pub limit: usize,

    /// Start in fuzzy mode instead of escalating into it
    pub fuzzy: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_PAGE_SIZE,
            fuzzy: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}

/// Plans and executes one fuzzy level of the query cascade.
pub(crate) struct CascadePlanner<'a> {
    index: &'a Index,
    schema: Schema,
    fields: &'a SchemaFields,
    token_cap: usize,
}

impl<'a> CascadePlanner<'a> {
    pub fn new(index: &'a Index, fields: &'a SchemaFields, token_cap: usize) -> Self {
        Self {
            index,
            schema: index.schema(),
            fields,
            token_cap,
        }
    }

    /// Parser over the searchable fields {title, content, name}.
    ///
    /// Conjunction by default: a multi-token query only matches documents
    /// containing every token. Fuzzy options apply to title and content
    /// only, prefix-aware at edit distance 2.
    fn parser(&self, fuzzy: bool) -> QueryParser {
        let mut parser = QueryParser::for_index(
            self.index,
            vec![self.fields.title, self.fields.content, self.fields.name],
        );
        parser.set_conjunction_by_default();
        if fuzzy {
            parser.set_field_fuzzy(self.fields.title, true, FUZZY_DISTANCE, true);
            parser.set_field_fuzzy(self.fields.content, true, FUZZY_DISTANCE, true);
        }
        parser
    }

    /// Run the cascade at one fuzzy level.
    ///
    /// An empty result means this level is exhausted; the caller decides
    /// whether to escalate.
    pub fn run(
        &self,
        searcher: &Searcher,
        query_text: &str,
        limit: usize,
        fuzzy: bool,
    ) -> SearchResult<Vec<SearchHit>> {
        let tokens: Vec<&str> = query_text.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let parser = self.parser(fuzzy);

        // Every highlight pass uses the non-fuzzy whole-query parse. This
        // keeps highlights precise when retrieval is fuzzy, and it gives a
        // document reached via several tokens identical highlight records,
        // which is what lets deduplication collapse them to one entry.
        let reference_query: Box<dyn Query> = self.parser(false).parse_query(query_text)?;

        let mut token_sets: Vec<HashSet<DocAddress>> = Vec::with_capacity(tokens.len());
        let mut highlights: Vec<SearchHit> = Vec::new();

        for token in &tokens {
            let token_query = parser.parse_query(token)?;
            let top = searcher.search(&*token_query, &TopDocs::with_limit(self.token_cap))?;

            // Keep retrieval order for deterministic tie-breaking downstream
            let ordered: Vec<DocAddress> = top.into_iter().map(|(_, addr)| addr).collect();
            let set: HashSet<DocAddress> = ordered.iter().copied().collect();

            highlights.extend(highlight_addresses(
                searcher,
                reference_query.as_ref(),
                &self.schema,
                self.fields,
                &ordered,
            )?);

            token_sets.push(set);
        }

        // No token matched anything at all: this fuzzy level has no results
        if token_sets.iter().all(HashSet::is_empty) {
            debug!(query = query_text, fuzzy, "no token matched");
            return Ok(Vec::new());
        }

        let mut candidates = token_sets[0].clone();
        for set in &token_sets[1..] {
            candidates.retain(|address| set.contains(address));
        }

        // Fallback retrieval is bounded by a third of the page size; a page
        // too small to grant a fallback slot skips the stage (TopDocs also
        // rejects a zero limit).
        let fallback_limit = limit / 3;
        if candidates.is_empty() && fallback_limit > 0 {
            // Tokens matched individually but never co-occurred within the
            // per-token cap: fall back to parsing the whole query at once.
            debug!(query = query_text, fuzzy, "empty intersection, whole-query fallback");

            let whole_query = parser.parse_query(query_text)?;
            let top = searcher.search(&*whole_query, &TopDocs::with_limit(fallback_limit))?;

            let mut ordered: Vec<DocAddress> = Vec::new();
            for (_, address) in top {
                if candidates.insert(address) {
                    ordered.push(address);
                }
            }

            highlights.extend(highlight_addresses(
                searcher,
                reference_query.as_ref(),
                &self.schema,
                self.fields,
                &ordered,
            )?);
        }

        Ok(rank(highlights, &candidates, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::new("fix bug");
        assert_eq!(request.query, "fix bug");
        assert_eq!(request.limit, DEFAULT_PAGE_SIZE);
        assert!(!request.fuzzy);
    }

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new("fix bug").with_limit(5).with_fuzzy(true);
        assert_eq!(request.limit, 5);
        assert!(request.fuzzy);
    }
}
