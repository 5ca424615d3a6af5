//! Scripted collaborators for tests.
//!
//! Compiled for this crate's own tests and, through the `test-support`
//! feature, for downstream crates' tests. Each double records what it was
//! asked so tests can assert on prompts and call counts.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    ChatMessage, Completion, GenerationError, HumanInput, HumanInputError, SearchBackend,
    SearchError, SearchHit, TextGenerator,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------

/// A [`TextGenerator`] that replays a fixed queue of replies.
///
/// Once the queue is drained every further call fails with
/// [`GenerationError::Transport`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<Completion, GenerationError>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    /// Replies with each text in turn, without usage information.
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::replies(texts.into_iter().map(|t| Ok(Completion::text(t))))
    }

    pub fn replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<Completion, GenerationError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every message list received so far, in call order.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.requests).clone()
    }

    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<Completion, GenerationError> {
        lock(&self.requests).push(messages.to_vec());
        lock(&self.replies).pop_front().unwrap_or_else(|| {
            Err(GenerationError::Transport(
                "scripted generator exhausted".to_string(),
            ))
        })
    }
}

// ---------------------------------------------------------------------------

/// A [`HumanInput`] that answers from a fixed queue.
///
/// Once drained it behaves like a closed input stream.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// An input whose stream is already closed.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Every prompt shown so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

#[async_trait]
impl HumanInput for ScriptedInput {
    async fn request_supplement(&self, prompt: &str) -> Result<String, HumanInputError> {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.answers)
            .pop_front()
            .ok_or(HumanInputError::Closed)
    }
}

// ---------------------------------------------------------------------------

/// A [`SearchBackend`] that returns the same outcome for every query.
#[derive(Debug)]
pub struct StaticSearch {
    outcome: Result<Vec<SearchHit>, SearchError>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl StaticSearch {
    pub fn hits(hits: Vec<SearchHit>) -> Self {
        Self::with_outcome(Ok(hits))
    }

    pub fn failing(err: SearchError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<Vec<SearchHit>, SearchError>) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every query received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl SearchBackend for StaticSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.queries).push(query.to_string());
        self.outcome.clone()
    }
}
