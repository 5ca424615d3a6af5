//! Step 4: write the report.

use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{ResearchError, ResearchState, StateUpdate, StepName, TextGenerator};
use tracing::info;

use crate::node::{Node, NodeOutput};
use crate::prompts;

/// Composes topic, details and search results into a report request and
/// writes the model's answer verbatim as `report`.
pub struct SynthesizeReport {
    generator: Arc<dyn TextGenerator>,
    language: String,
}

impl SynthesizeReport {
    pub fn new(generator: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self {
            generator,
            language: language.into(),
        }
    }
}

#[async_trait]
impl Node for SynthesizeReport {
    fn name(&self) -> StepName {
        StepName::SynthesizeReport
    }

    async fn run(&self, state: &ResearchState) -> Result<NodeOutput, ResearchError> {
        let details = state.require_details()?;
        let results = state.require_results()?;
        let messages = prompts::report(state.topic(), details, results, &self.language);

        let completion = self
            .generator
            .generate(&messages)
            .await
            .map_err(|source| ResearchError::Generation {
                step: self.name(),
                source,
            })?;
        info!(chars = completion.text.len(), "Report written");
        Ok(NodeOutput::new(StateUpdate::Report(completion.text)).with_usage(completion.usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::testing::ScriptedGenerator;
    use pipeline::{Completion, TokenUsage, Topic};

    #[tokio::test]
    async fn test_report_is_model_text_with_usage() {
        let generator = Arc::new(ScriptedGenerator::replies([Ok(Completion {
            text: "Report body".to_string(),
            usage: Some(TokenUsage::new(120, 40)),
        })]));
        let mut state = ResearchState::new(Topic::new("qec").unwrap());
        state.apply(StateUpdate::Details("d".into())).unwrap();
        state.apply(StateUpdate::Query("q".into())).unwrap();
        state
            .apply(StateUpdate::Results(vec!["A - https://a".into()]))
            .unwrap();

        let output = SynthesizeReport::new(generator.clone(), "English")
            .run(&state)
            .await
            .unwrap();

        assert_eq!(output.update, StateUpdate::Report("Report body".to_string()));
        assert_eq!(output.usage, TokenUsage::new(120, 40));
        assert!(generator.requests()[0][0].content.contains("A - https://a"));
    }
}
