//! Step 3: run the web search.

use async_trait::async_trait;
use pipeline::{
    ResearchError, ResearchState, SearchClient, StateUpdate, StepName, SEARCH_RESULT_LIMIT,
};
use tracing::info;

use crate::node::{Node, NodeOutput};

/// Searches for `query` and writes at most five result lines.
///
/// Never fails on a search problem: [`SearchClient`] encodes the failure as a
/// single sentinel line.
pub struct SearchWeb {
    client: SearchClient,
}

impl SearchWeb {
    pub fn new(client: SearchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Node for SearchWeb {
    fn name(&self) -> StepName {
        StepName::Search
    }

    async fn run(&self, state: &ResearchState) -> Result<NodeOutput, ResearchError> {
        let query = state.require_query()?;
        let mut results = self.client.search(query).await;
        results.truncate(SEARCH_RESULT_LIMIT);
        info!(count = results.len(), "Search finished");
        Ok(NodeOutput::new(StateUpdate::Results(results)))
    }
}
