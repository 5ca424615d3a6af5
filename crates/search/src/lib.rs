//! Web search adapter.
//!
//! Implements the [`pipeline::SearchBackend`] trait over a SearxNG instance's
//! JSON API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, the HTTP request and response
//! decoding live here. Failures are returned as [`pipeline::SearchError`];
//! degrading them into a sentinel result is [`pipeline::SearchClient`]'s job,
//! not this crate's.

pub mod config;
pub mod searxng;

pub use config::SearchConfig;
pub use searxng::SearxngBackend;
