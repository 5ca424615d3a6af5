//! Error types for the research pipeline domain.
//!
//! Failures fall into two tiers:
//!
//! - **Fatal.** [`GenerationError`] and [`HumanInputError`] abort the run. The
//!   executor wraps them in [`ResearchError`] together with the step that
//!   produced them and returns them to the caller; no partial result is
//!   delivered.
//! - **Recovered.** [`SearchError`] never leaves the search step. The
//!   [`crate::SearchClient`] converts it into a single sentinel result line
//!   and the run continues.
//!
//! Nothing is retried.

use thiserror::Error;

use crate::{Stage, StepName};

// ---------------------------------------------------------------------------
// Collaborator errors
// ---------------------------------------------------------------------------

/// Failure of a call to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request could not be sent or the connection failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend did not answer within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The response body could not be interpreted as a chat completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The backend returned a well-formed response without any choices.
    #[error("response contained no choices")]
    EmptyChoices,
}

/// Failure of a call to the search backend.
///
/// The `Display` text is the reason embedded in the sentinel result line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query was empty; the backend was not contacted.
    #[error("empty query")]
    EmptyQuery,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Failure to obtain input from the human in the loop.
#[derive(Debug, Error)]
pub enum HumanInputError {
    /// The input stream reached end-of-file before a line was read.
    #[error("input stream closed")]
    Closed,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a research run.
///
/// Produced by the step nodes and the executor. Search failures never appear
/// here; see [`SearchError`].
#[derive(Debug, Error)]
pub enum ResearchError {
    /// A generation call made by `step` failed.
    #[error("step '{step}' failed to generate text: {source}")]
    Generation {
        step: StepName,
        #[source]
        source: GenerationError,
    },

    /// Reading the human's supplement in `step` failed.
    #[error("step '{step}' failed to read human input: {source}")]
    HumanInput {
        step: StepName,
        #[source]
        source: HumanInputError,
    },

    /// A state update tried to write a field other than the one owned by the
    /// next stage (overwriting a field, or skipping ahead).
    #[error("update '{update}' cannot be applied at stage {stage}")]
    OutOfOrderUpdate {
        /// Stage the state was in when the update arrived.
        stage: Stage,
        /// Field the update tried to write.
        update: &'static str,
    },

    /// A step read a field that no earlier step has written.
    #[error("state field '{field}' has not been written yet")]
    MissingField { field: &'static str },

    /// Collaborators could not be constructed from the supplied configuration.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_reasons_are_human_readable() {
        assert_eq!(SearchError::Timeout.to_string(), "request timed out");
        assert_eq!(
            SearchError::Status { status: 502 }.to_string(),
            "backend returned HTTP 502"
        );
    }

    #[test]
    fn test_generation_error_names_step() {
        let err = ResearchError::Generation {
            step: StepName::BuildQuery,
            source: GenerationError::EmptyChoices,
        };
        assert_eq!(
            err.to_string(),
            "step 'build_query' failed to generate text: response contained no choices"
        );
    }
}
