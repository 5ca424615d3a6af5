//! The degrade-gracefully search client.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{SearchBackend, SearchError};

/// Maximum number of result lines a search produces.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Wraps a [`SearchBackend`] so that searching never fails.
///
/// Successful searches yield at most `limit` `"<title> - <url>"` lines in
/// backend order. Any backend failure yields exactly one line,
/// `"(search failed: <reason>)"`.
#[derive(Clone)]
pub struct SearchClient {
    backend: Arc<dyn SearchBackend>,
    limit: usize,
}

impl SearchClient {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            limit: SEARCH_RESULT_LIMIT,
        }
    }

    /// Overrides the result limit. A limit of zero is raised to one.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn search(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            warn!("Refusing to search with an empty query");
            return vec![sentinel(&SearchError::EmptyQuery)];
        }

        match self.backend.search(query).await {
            Ok(hits) => {
                debug!(returned = hits.len(), limit = self.limit, "Search succeeded");
                hits.iter()
                    .take(self.limit)
                    .map(ToString::to_string)
                    .collect()
            }
            Err(err) => {
                warn!(error = %err, "Search failed; continuing without results");
                vec![sentinel(&err)]
            }
        }
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// The single result line substituted for real results on failure.
pub fn sentinel(err: &SearchError) -> String {
    format!("(search failed: {err})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticSearch;
    use crate::SearchHit;

    fn hits(n: usize) -> Vec<SearchHit> {
        (0..n)
            .map(|i| SearchHit::new(format!("Title {i}"), format!("https://example.org/{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_truncates_to_five_preserving_order() {
        let backend = Arc::new(StaticSearch::hits(hits(8)));
        let client = SearchClient::new(backend.clone());

        let results = client.search("surface code").await;

        assert_eq!(
            results,
            vec![
                "Title 0 - https://example.org/0",
                "Title 1 - https://example.org/1",
                "Title 2 - https://example.org/2",
                "Title 3 - https://example.org/3",
                "Title 4 - https://example.org/4",
            ]
        );
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_exactly_five_results_are_kept() {
        let client = SearchClient::new(Arc::new(StaticSearch::hits(hits(5))));
        assert_eq!(client.search("q").await.len(), 5);
    }

    #[tokio::test]
    async fn test_fewer_than_limit_returns_all() {
        let client = SearchClient::new(Arc::new(StaticSearch::hits(hits(3))));
        assert_eq!(client.search("q").await.len(), 3);
    }

    #[tokio::test]
    async fn test_no_hits_returns_empty_list() {
        let client = SearchClient::new(Arc::new(StaticSearch::hits(Vec::new())));
        assert!(client.search("q").await.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_single_sentinel() {
        let client = SearchClient::new(Arc::new(StaticSearch::failing(SearchError::Timeout)));

        let results = client.search("q").await;

        assert_eq!(results, vec!["(search failed: request timed out)".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_query_skips_backend() {
        let backend = Arc::new(StaticSearch::hits(hits(2)));
        let client = SearchClient::new(backend.clone());

        let results = client.search("  ").await;

        assert_eq!(results, vec!["(search failed: empty query)".to_string()]);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_limit() {
        let client = SearchClient::new(Arc::new(StaticSearch::hits(hits(4)))).with_limit(2);
        assert_eq!(client.search("q").await.len(), 2);
        assert_eq!(SearchClient::new(Arc::new(StaticSearch::hits(hits(1)))).with_limit(0).limit(), 1);
    }
}
