//! Capability traits for the collaborators a research run depends on.
//!
//! Infrastructure crates implement these; the step nodes only ever see the
//! traits. Every collaborator is constructed explicitly and injected into the
//! executor, so tests can substitute the scripted doubles from
//! `crate::testing`.

use async_trait::async_trait;

use crate::{ChatMessage, Completion, GenerationError, HumanInputError, SearchError, SearchHit};

/// A remote chat-completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the single best completion for `messages`.
    ///
    /// `messages` is non-empty and ordered; roles are `system` or `user`.
    /// Implementations strip leading and trailing whitespace from the text.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<Completion, GenerationError>;
}

/// Raw access to a web search aggregator.
///
/// Errors are returned as-is; [`crate::SearchClient`] is responsible for
/// degrading them into a sentinel result.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs `query` and returns hits in the order the backend ranked them.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// The human in the loop.
#[async_trait]
pub trait HumanInput: Send + Sync {
    /// Shows `prompt` and blocks until the human answers.
    ///
    /// There is no timeout; an empty answer is a valid answer.
    async fn request_supplement(&self, prompt: &str) -> Result<String, HumanInputError>;
}
