//! Step 2: derive search keywords.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{ResearchError, ResearchState, StateUpdate, StepName, TextGenerator};
use tracing::info;

use crate::node::{Node, NodeOutput};
use crate::prompts;

/// Asks the model for 3-5 search keywords and writes them as a single-line
/// `query`.
pub struct BuildQuery {
    generator: Arc<dyn TextGenerator>,
}

impl BuildQuery {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for BuildQuery {
    fn name(&self) -> StepName {
        StepName::BuildQuery
    }

    async fn run(&self, state: &ResearchState) -> Result<NodeOutput, ResearchError> {
        let details = state.require_details()?;
        let completion = self
            .generator
            .generate(&prompts::search_keywords(state.topic(), details))
            .await
            .map_err(|source| ResearchError::Generation {
                step: self.name(),
                source,
            })?;

        let query = single_line(&completion.text);
        info!(%query, "Search query built");
        Ok(NodeOutput::new(StateUpdate::Query(query)).with_usage(completion.usage))
    }
}

/// Replaces each line break (`\n` or `\r\n`) with a space.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::testing::ScriptedGenerator;
    use pipeline::Topic;

    fn state_with_details() -> ResearchState {
        let mut state = ResearchState::new(Topic::new("qec").unwrap());
        state
            .apply(StateUpdate::Details("Q?\nUser supplement: hw".into()))
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_newlines_collapse_to_spaces() {
        let generator = Arc::new(ScriptedGenerator::texts(["surface code\nlogical qubit\r\ndecoder"]));
        let node = BuildQuery::new(generator.clone());

        let output = node.run(&state_with_details()).await.unwrap();

        assert_eq!(
            output.update,
            StateUpdate::Query("surface code logical qubit decoder".to_string())
        );
        let prompt = &generator.requests()[0][0].content;
        assert!(prompt.contains("\"Q?\nUser supplement: hw\""));
    }

    #[tokio::test]
    async fn test_requires_details() {
        let node = BuildQuery::new(Arc::new(ScriptedGenerator::texts(["k"])));
        let state = ResearchState::new(Topic::new("qec").unwrap());

        let err = node.run(&state).await.unwrap_err();

        assert!(matches!(err, ResearchError::MissingField { field: "details" }));
    }

    #[test]
    fn test_single_line_keeps_text_without_breaks() {
        assert_eq!(single_line("a b c"), "a b c");
    }
}
