//! The step-node abstraction.

use async_trait::async_trait;
use pipeline::{ResearchError, ResearchState, StateUpdate, StepName, TokenUsage};

/// What a node hands back to the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutput {
    /// The single field this node writes.
    pub update: StateUpdate,

    /// Tokens spent on generation calls made by this node (zero if none).
    pub usage: TokenUsage,
}

impl NodeOutput {
    pub fn new(update: StateUpdate) -> Self {
        Self {
            update,
            usage: TokenUsage::default(),
        }
    }

    pub fn with_usage(mut self, usage: Option<TokenUsage>) -> Self {
        self.usage = usage.unwrap_or_default();
        self
    }
}

/// One step of the research pipeline.
///
/// A node reads the fields earlier steps wrote and returns a partial update.
/// It borrows the state only for the duration of [`Node::run`] and never
/// mutates it; applying the update is the executor's job.
#[async_trait]
pub trait Node: Send + Sync {
    fn name(&self) -> StepName;

    async fn run(&self, state: &ResearchState) -> Result<NodeOutput, ResearchError>;
}
