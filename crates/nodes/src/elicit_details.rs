//! Step 1: ask the model for clarifying questions, then ask the human.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{
    HumanInput, ResearchError, ResearchState, StateUpdate, StepName, TextGenerator,
};
use tracing::info;

use crate::node::{Node, NodeOutput};
use crate::prompts;

/// Generates clarifying questions about the topic and blocks until the human
/// supplies extra detail.
///
/// Writes `details` as `<questions>` + [`prompts::DETAILS_SEPARATOR`] +
/// `<answer>`. This is the only point in a run that waits on a person.
pub struct ElicitDetails {
    generator: Arc<dyn TextGenerator>,
    human: Arc<dyn HumanInput>,
}

impl ElicitDetails {
    pub fn new(generator: Arc<dyn TextGenerator>, human: Arc<dyn HumanInput>) -> Self {
        Self { generator, human }
    }
}

#[async_trait]
impl Node for ElicitDetails {
    fn name(&self) -> StepName {
        StepName::ElicitDetails
    }

    async fn run(&self, state: &ResearchState) -> Result<NodeOutput, ResearchError> {
        let completion = self
            .generator
            .generate(&prompts::clarifying_questions(state.topic()))
            .await
            .map_err(|source| ResearchError::Generation {
                step: self.name(),
                source,
            })?;
        info!(questions = %completion.text, "Clarifying questions generated");

        let answer = self
            .human
            .request_supplement(&prompts::supplement_prompt(&completion.text))
            .await
            .map_err(|source| ResearchError::HumanInput {
                step: self.name(),
                source,
            })?;

        let details = format!(
            "{}{}{}",
            completion.text,
            prompts::DETAILS_SEPARATOR,
            answer
        );
        Ok(NodeOutput::new(StateUpdate::Details(details)).with_usage(completion.usage))
    }
}
