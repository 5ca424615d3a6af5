//! Chat-completion provider adapter.
//!
//! Implements the [`pipeline::TextGenerator`] trait for any backend that
//! speaks the OpenAI chat-completions protocol (OpenAI itself, DashScope's
//! compatible mode, local gateways). Other protocols are added as new
//! `impl` blocks in this crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::TextGenerator`]. Calls are never retried.

pub mod client;
pub mod config;
mod wire;

pub use client::OpenAiCompatClient;
pub use config::LlmConfig;
