//! Core domain for the research assistant.
//!
//! This crate contains the pipeline state, the stage machine that orders
//! writes to it, the error taxonomy, and the port traits for the three
//! collaborators a run depends on (text generation, web search, and the human
//! in the loop). Infrastructure crates implement the traits defined here; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`Topic`, `ModelName`, `PipelineRunId`) |
//! | [`types`] | Shared value types (`ChatMessage`, `Completion`, `SearchHit`, etc.) |
//! | [`state`] | `ResearchState`, `Stage`, `StateUpdate`, `CompletedResearch` |
//! | [`errors`] | Collaborator errors and the run-aborting `ResearchError` |
//! | [`ports`] | `TextGenerator`, `SearchBackend`, `HumanInput` |
//! | [`search`] | `SearchClient`, which turns search failures into a sentinel result |

pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod search;
pub mod state;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{GenerationError, HumanInputError, ResearchError, SearchError};
pub use identifiers::{ModelName, PipelineRunId, Topic};
pub use ports::{HumanInput, SearchBackend, TextGenerator};
pub use search::{sentinel, SearchClient, SEARCH_RESULT_LIMIT};
pub use state::{CompletedResearch, ResearchState, Stage, StateUpdate, StepName};
pub use types::{
    ChatMessage, ChatRole, Completion, SearchHit, Timestamp, TokenCount, TokenUsage,
};
