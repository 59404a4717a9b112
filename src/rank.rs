//! Result ranking, deduplication and truncation
//!
//! Title matches dominate ranking over content matches. Ranking never
//! retries; escalation to fuzzy mode is the planner's decision.

use crate::service::SearchHit;
use std::collections::HashSet;
use tantivy::DocAddress;

/// Produce the final ordered result sequence.
///
/// Keeps only highlights whose address is in the candidate set, drops
/// structural duplicates (a document reached via two tokens keeps one
/// entry), sorts descending by (title highlights, content highlights)
/// with ties keeping their relative order, and truncates to `limit`.
pub(crate) fn rank(
    highlights: Vec<SearchHit>,
    candidates: &HashSet<DocAddress>,
    limit: usize,
) -> Vec<SearchHit> {
    let mut ranked: Vec<SearchHit> = Vec::new();
    for hit in highlights {
        let address = DocAddress::new(hit.address.0, hit.address.1);
        if candidates.contains(&address) && !ranked.contains(&hit) {
            ranked.push(hit);
        }
    }

    // sort_by is stable, so equal-count hits keep their relative order
    ranked.sort_by(|a, b| {
        (b.title_highlight_count, b.content_highlight_count)
            .cmp(&(a.title_highlight_count, a.content_highlight_count))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, address: (u32, u32), title_count: usize, content_count: usize) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            name: id.to_string(),
            title: String::new(),
            content: String::new(),
            table: "task".to_string(),
            highlighted_title: String::new(),
            highlighted_content: String::new(),
            title_highlight_count: title_count,
            content_highlight_count: content_count,
            fields: serde_json::Map::new(),
            address,
        }
    }

    fn candidates(addresses: &[(u32, u32)]) -> HashSet<DocAddress> {
        addresses
            .iter()
            .map(|&(segment, doc)| DocAddress::new(segment, doc))
            .collect()
    }

    #[test]
    fn test_title_highlights_dominate() {
        let hits = vec![
            hit("a", (0, 0), 0, 5),
            hit("b", (0, 1), 2, 0),
            hit("c", (0, 2), 1, 9),
        ];
        let ranked = rank(hits, &candidates(&[(0, 0), (0, 1), (0, 2)]), 10);
        let ids: Vec<&str> = ranked.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_content_highlights_break_ties() {
        let hits = vec![hit("a", (0, 0), 1, 1), hit("b", (0, 1), 1, 4)];
        let ranked = rank(hits, &candidates(&[(0, 0), (0, 1)]), 10);
        assert_eq!(ranked[0].id, "b");
    }

    #[test]
    fn test_equal_counts_keep_relative_order() {
        let hits = vec![
            hit("first", (0, 0), 1, 1),
            hit("second", (0, 1), 1, 1),
            hit("third", (0, 2), 1, 1),
        ];
        let ranked = rank(hits, &candidates(&[(0, 0), (0, 1), (0, 2)]), 10);
        let ids: Vec<&str> = ranked.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let hits = vec![hit("a", (0, 0), 1, 1), hit("a", (0, 0), 1, 1)];
        let ranked = rank(hits, &candidates(&[(0, 0)]), 10);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_non_candidates_filtered() {
        let hits = vec![hit("a", (0, 0), 3, 0), hit("b", (0, 1), 1, 0)];
        let ranked = rank(hits, &candidates(&[(0, 1)]), 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "b");
    }

    #[test]
    fn test_truncates_to_limit() {
        let hits: Vec<SearchHit> = (0u32..8)
            .map(|i| hit(&format!("h{i}"), (0, i), 1, 0))
            .collect();
        let all: Vec<(u32, u32)> = (0u32..8).map(|i| (0, i)).collect();
        let ranked = rank(hits, &candidates(&all), 3);
        assert_eq!(ranked.len(), 3);
    }
}
