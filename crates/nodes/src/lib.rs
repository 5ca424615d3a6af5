//! Research pipeline node implementations and executor.
//!
//! This crate provides the four step nodes (details elicitation, query
//! building, web search, report synthesis), the prompt templates they send,
//! and the [`PipelineExecutor`] that applies them in order to a
//! [`pipeline::ResearchState`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Nodes sequence calls between the domain types in
//! the [`pipeline`] crate and the collaborator traits (generation, search,
//! human input). They contain no transport code of their own.

pub mod build_query;
pub mod elicit_details;
pub mod executor;
pub mod node;
pub mod prompts;
pub mod search_web;
pub mod synthesize_report;

pub use build_query::BuildQuery;
pub use elicit_details::ElicitDetails;
pub use executor::{PipelineExecutor, ResearchRun, StepRecord};
pub use node::{Node, NodeOutput};
pub use search_web::SearchWeb;
pub use synthesize_report::SynthesizeReport;
