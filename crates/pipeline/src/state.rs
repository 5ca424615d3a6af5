//! The pipeline state record and the stage machine that governs it.
//!
//! A [`ResearchState`] is created with only its [`Topic`] and grows one field
//! per step. Fields are private; the only way to write one is
//! [`ResearchState::apply`], which accepts a [`StateUpdate`] only when it
//! writes the field owned by the next [`Stage`]. A field therefore cannot be
//! overwritten, and no step can write ahead of the steps before it.
//!
//! ```text
//! Start ──details──▶ AfterDetails ──query──▶ AfterQuery ──results──▶ AfterSearch ──report──▶ Done
//! ```

use serde::{Deserialize, Serialize};

use crate::{ResearchError, Topic};

// ---------------------------------------------------------------------------
// Steps and stages
// ---------------------------------------------------------------------------

/// Names the four pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    ElicitDetails,
    BuildQuery,
    Search,
    SynthesizeReport,
}

impl StepName {
    /// All steps in the order the executor runs them.
    pub const ALL: [StepName; 4] = [
        StepName::ElicitDetails,
        StepName::BuildQuery,
        StepName::Search,
        StepName::SynthesizeReport,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepName::ElicitDetails => "elicit_details",
            StepName::BuildQuery => "build_query",
            StepName::Search => "search",
            StepName::SynthesizeReport => "synthesize_report",
        }
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a run in the linear stage machine.
///
/// Transitions are unconditional and strictly ordered; `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    AfterDetails,
    AfterQuery,
    AfterSearch,
    Done,
}

impl Stage {
    /// The stage that follows this one, or `None` for [`Stage::Done`].
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Start => Some(Stage::AfterDetails),
            Stage::AfterDetails => Some(Stage::AfterQuery),
            Stage::AfterQuery => Some(Stage::AfterSearch),
            Stage::AfterSearch => Some(Stage::Done),
            Stage::Done => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "START",
            Stage::AfterDetails => "AFTER_DETAILS",
            Stage::AfterQuery => "AFTER_QUERY",
            Stage::AfterSearch => "AFTER_SEARCH",
            Stage::Done => "DONE",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// A partial state update produced by one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateUpdate {
    Details(String),
    Query(String),
    Results(Vec<String>),
    Report(String),
}

impl StateUpdate {
    /// Name of the state field this update writes.
    pub fn field(&self) -> &'static str {
        match self {
            StateUpdate::Details(_) => "details",
            StateUpdate::Query(_) => "query",
            StateUpdate::Results(_) => "results",
            StateUpdate::Report(_) => "report",
        }
    }

    /// The only stage at which this update may be applied.
    fn applies_at(&self) -> Stage {
        match self {
            StateUpdate::Details(_) => Stage::Start,
            StateUpdate::Query(_) => Stage::AfterDetails,
            StateUpdate::Results(_) => Stage::AfterQuery,
            StateUpdate::Report(_) => Stage::AfterSearch,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The single record threaded through all steps of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchState {
    topic: Topic,
    details: Option<String>,
    query: Option<String>,
    results: Option<Vec<String>>,
    report: Option<String>,
}

impl ResearchState {
    /// Creates a state at [`Stage::Start`] with only the topic set.
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            details: None,
            query: None,
            results: None,
            report: None,
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn results(&self) -> Option<&[String]> {
        self.results.as_deref()
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// Current stage, derived from the most advanced field written.
    pub fn stage(&self) -> Stage {
        if self.report.is_some() {
            Stage::Done
        } else if self.results.is_some() {
            Stage::AfterSearch
        } else if self.query.is_some() {
            Stage::AfterQuery
        } else if self.details.is_some() {
            Stage::AfterDetails
        } else {
            Stage::Start
        }
    }

    /// Applies `update` and returns the stage entered.
    ///
    /// # Errors
    ///
    /// [`ResearchError::OutOfOrderUpdate`] if the update does not write the
    /// field owned by the next stage. The state is left unchanged.
    pub fn apply(&mut self, update: StateUpdate) -> Result<Stage, ResearchError> {
        let stage = self.stage();
        if update.applies_at() != stage {
            return Err(ResearchError::OutOfOrderUpdate {
                stage,
                update: update.field(),
            });
        }

        match update {
            StateUpdate::Details(details) => self.details = Some(details),
            StateUpdate::Query(query) => self.query = Some(query),
            StateUpdate::Results(results) => self.results = Some(results),
            StateUpdate::Report(report) => self.report = Some(report),
        }
        Ok(self.stage())
    }

    pub fn require_details(&self) -> Result<&str, ResearchError> {
        self.details()
            .ok_or(ResearchError::MissingField { field: "details" })
    }

    pub fn require_query(&self) -> Result<&str, ResearchError> {
        self.query().ok_or(ResearchError::MissingField { field: "query" })
    }

    pub fn require_results(&self) -> Result<&[String], ResearchError> {
        self.results()
            .ok_or(ResearchError::MissingField { field: "results" })
    }

    /// Converts a [`Stage::Done`] state into a [`CompletedResearch`].
    ///
    /// # Errors
    ///
    /// [`ResearchError::MissingField`] naming the first field not yet written.
    pub fn finish(self) -> Result<CompletedResearch, ResearchError> {
        let missing = |field| ResearchError::MissingField { field };
        Ok(CompletedResearch {
            topic: self.topic,
            details: self.details.ok_or_else(|| missing("details"))?,
            query: self.query.ok_or_else(|| missing("query"))?,
            results: self.results.ok_or_else(|| missing("results"))?,
            report: self.report.ok_or_else(|| missing("report"))?,
        })
    }
}

/// The fully populated state exposed at [`Stage::Done`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedResearch {
    pub topic: Topic,
    /// Generated clarifying questions followed by the human supplement.
    pub details: String,
    /// Single-line search keywords.
    pub query: String,
    /// At most five `"<title> - <url>"` lines, or one sentinel line.
    pub results: Vec<String>,
    pub report: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ResearchState {
        ResearchState::new(Topic::new("quantum error correction").unwrap())
    }

    #[test]
    fn test_new_state_starts_with_only_topic() {
        let state = state();
        assert_eq!(state.stage(), Stage::Start);
        assert_eq!(state.topic().as_str(), "quantum error correction");
        assert!(state.details().is_none());
        assert!(state.query().is_none());
        assert!(state.results().is_none());
        assert!(state.report().is_none());
    }

    #[test]
    fn test_updates_in_order_reach_done() {
        let mut state = state();
        assert_eq!(
            state.apply(StateUpdate::Details("d".into())).unwrap(),
            Stage::AfterDetails
        );
        assert_eq!(
            state.apply(StateUpdate::Query("q".into())).unwrap(),
            Stage::AfterQuery
        );
        assert_eq!(
            state.apply(StateUpdate::Results(vec!["r".into()])).unwrap(),
            Stage::AfterSearch
        );
        assert_eq!(
            state.apply(StateUpdate::Report("report".into())).unwrap(),
            Stage::Done
        );

        let done = state.finish().unwrap();
        assert_eq!(done.details, "d");
        assert_eq!(done.query, "q");
        assert_eq!(done.results, vec!["r".to_string()]);
        assert_eq!(done.report, "report");
    }

    #[test]
    fn test_skipping_ahead_is_rejected() {
        let mut state = state();
        let err = state.apply(StateUpdate::Query("q".into())).unwrap_err();
        assert!(matches!(
            err,
            ResearchError::OutOfOrderUpdate {
                stage: Stage::Start,
                update: "query"
            }
        ));
        assert_eq!(state.stage(), Stage::Start);
        assert!(state.query().is_none());
    }

    #[test]
    fn test_overwriting_is_rejected() {
        let mut state = state();
        state.apply(StateUpdate::Details("first".into())).unwrap();
        let err = state
            .apply(StateUpdate::Details("second".into()))
            .unwrap_err();
        assert!(matches!(err, ResearchError::OutOfOrderUpdate { .. }));
        assert_eq!(state.details(), Some("first"));
    }

    #[test]
    fn test_require_reports_missing_field() {
        let state = state();
        assert!(matches!(
            state.require_query(),
            Err(ResearchError::MissingField { field: "query" })
        ));
    }

    #[test]
    fn test_finish_before_done_fails() {
        let mut state = state();
        state.apply(StateUpdate::Details("d".into())).unwrap();
        assert!(matches!(
            state.finish(),
            Err(ResearchError::MissingField { field: "query" })
        ));
    }

    #[test]
    fn test_stage_next_walks_to_done() {
        let mut stage = Stage::Start;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                Stage::Start,
                Stage::AfterDetails,
                Stage::AfterQuery,
                Stage::AfterSearch,
                Stage::Done
            ]
        );
    }
}
