//! The pipeline executor: runs the four nodes in a fixed order.

use std::sync::Arc;

use pipeline::{
    CompletedResearch, HumanInput, PipelineRunId, ResearchError, ResearchState, SearchClient,
    StepName, TextGenerator, Timestamp, TokenUsage, Topic,
};
use serde::Serialize;
use tracing::{error, info, info_span, Instrument};

use crate::node::Node;
use crate::prompts::DEFAULT_REPORT_LANGUAGE;
use crate::{BuildQuery, ElicitDetails, SearchWeb, SynthesizeReport};

/// One entry of the in-memory step log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: StepName,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub usage: TokenUsage,
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchRun {
    pub run_id: PipelineRunId,
    pub research: CompletedResearch,
    /// One record per step, in execution order.
    pub steps: Vec<StepRecord>,
}

impl ResearchRun {
    /// Token usage summed over all steps.
    pub fn total_usage(&self) -> TokenUsage {
        self.steps.iter().map(|s| s.usage).sum()
    }
}

/// Drives a run from `START` to `DONE`.
///
/// Nodes execute strictly one after another. A node error aborts the run and
/// is returned unchanged; there is no retry and no skipping.
pub struct PipelineExecutor {
    nodes: Vec<Box<dyn Node>>,
}

impl PipelineExecutor {
    /// Builds the standard four-step pipeline over the given collaborators.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        search: SearchClient,
        human: Arc<dyn HumanInput>,
    ) -> Self {
        Self::with_report_language(generator, search, human, DEFAULT_REPORT_LANGUAGE)
    }

    pub fn with_report_language(
        generator: Arc<dyn TextGenerator>,
        search: SearchClient,
        human: Arc<dyn HumanInput>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            nodes: vec![
                Box::new(ElicitDetails::new(generator.clone(), human)),
                Box::new(BuildQuery::new(generator.clone())),
                Box::new(SearchWeb::new(search)),
                Box::new(SynthesizeReport::new(generator, language)),
            ],
        }
    }

    /// Names of the nodes in execution order.
    pub fn steps(&self) -> Vec<StepName> {
        self.nodes.iter().map(|n| n.name()).collect()
    }

    pub async fn run(&self, topic: Topic) -> Result<ResearchRun, ResearchError> {
        let run_id = PipelineRunId::new_random();
        let span = info_span!("research_run", %run_id, topic = %topic);
        self.run_inner(run_id, topic).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: PipelineRunId,
        topic: Topic,
    ) -> Result<ResearchRun, ResearchError> {
        info!("Research run started");
        let mut state = ResearchState::new(topic);
        let mut steps = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let step = node.name();
            let started_at = Timestamp::now();

            let output = node
                .run(&state)
                .instrument(info_span!("step", %step))
                .await
                .inspect_err(|err| error!(%step, error = %err, "Step failed; aborting run"))?;
            let stage = state.apply(output.update)?;

            info!(%step, %stage, "Step completed");
            steps.push(StepRecord {
                step,
                started_at,
                finished_at: Timestamp::now(),
                usage: output.usage,
            });
        }

        let research = state.finish()?;
        info!("Research run finished");
        Ok(ResearchRun {
            run_id,
            research,
            steps,
        })
    }
}
