//! SearxNG JSON API client.

use async_trait::async_trait;
use pipeline::{ResearchError, SearchBackend, SearchError, SearchHit};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::SearchConfig;

/// Title used for results the backend returns without one, or with an empty one.
pub const UNTITLED: &str = "(untitled)";

/// Issues `GET <search_url>?q=<query>&format=json` against a SearxNG instance.
#[derive(Debug, Clone)]
pub struct SearxngBackend {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngResult>,
}

#[derive(Debug, Deserialize)]
struct SearxngResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<SearxngResult> for SearchHit {
    fn from(r: SearxngResult) -> Self {
        let title = r
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        SearchHit::new(title, r.url.unwrap_or_default())
    }
}

impl SearxngBackend {
    /// # Errors
    ///
    /// [`ResearchError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, ResearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ResearchError::Configuration {
                message: format!("failed to build search HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            url: config.search_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SearchBackend for SearxngBackend {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        debug!(url = %self.url, "Querying SearxNG");
        let response = self
            .http
            .get(&self.url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        let parsed: SearxngResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        debug!(results = parsed.results.len(), "SearxNG answered");
        Ok(parsed.results.into_iter().map(SearchHit::from).collect())
    }
}

fn transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Transport(err.to_string())
    }
}
