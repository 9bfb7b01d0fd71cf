//! Immutable snapshot threaded through a scenario

use crate::core::outcome::{Outcome, ScenarioResult, StepOutcome};
use crate::report::format_step_results;
use std::sync::Arc;

/// The value produced so far, the outcome log that led to it and the
/// scenario title.
///
/// A container is never changed in place. Every step produces a new one whose
/// log is a copy of the previous log plus one entry, so a log observed through
/// an older container stays exactly as it was.
#[derive(Debug, Clone)]
pub struct Container<T> {
    content: T,
    step_outcomes: Arc<[StepOutcome]>,
    scenario_title: Option<String>,
}

impl<T> Container<T> {
    /// Start a chain: empty outcome log
    pub fn new(content: T, scenario_title: Option<String>) -> Self {
        Self::with_outcomes(content, Vec::new(), scenario_title)
    }

    pub fn with_outcomes(
        content: T,
        step_outcomes: Vec<StepOutcome>,
        scenario_title: Option<String>,
    ) -> Self {
        Self {
            content,
            step_outcomes: step_outcomes.into(),
            scenario_title,
        }
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_content(self) -> T {
        self.content
    }

    pub fn step_outcomes(&self) -> &[StepOutcome] {
        &self.step_outcomes
    }

    pub fn scenario_title(&self) -> Option<&str> {
        self.scenario_title.as_deref()
    }

    /// New container holding `content` whose log is this log plus `outcome`
    pub fn with_appended_outcome<R>(&self, content: R, outcome: StepOutcome) -> Container<R> {
        let mut step_outcomes = Vec::with_capacity(self.step_outcomes.len() + 1);
        step_outcomes.extend_from_slice(&self.step_outcomes);
        step_outcomes.push(outcome);

        Container {
            content,
            step_outcomes: step_outcomes.into(),
            scenario_title: self.scenario_title.clone(),
        }
    }

    /// Transform the content only; log and title are shared unchanged.
    ///
    /// Errors raised by `transform` are not caught here.
    pub fn map<R>(self, transform: impl FnOnce(T) -> R) -> Container<R> {
        Container {
            content: transform(self.content),
            step_outcomes: self.step_outcomes,
            scenario_title: self.scenario_title,
        }
    }

    /// Split off the content, keeping the log and title in a unit container
    pub fn take(self) -> (T, Container<()>) {
        (
            self.content,
            Container {
                content: (),
                step_outcomes: self.step_outcomes,
                scenario_title: self.scenario_title,
            },
        )
    }

    /// Copy of this container whose most recent outcome is reclassified.
    /// An empty log is left as it is.
    pub fn with_last_outcome(self, outcome: Outcome) -> Self {
        let Some((last, earlier)) = self.step_outcomes.split_last() else {
            return self;
        };

        let mut step_outcomes = Vec::with_capacity(self.step_outcomes.len());
        step_outcomes.extend_from_slice(earlier);
        step_outcomes.push(last.reclassified(outcome));

        Container {
            content: self.content,
            step_outcomes: step_outcomes.into(),
            scenario_title: self.scenario_title,
        }
    }

    pub fn to_scenario_result(&self) -> ScenarioResult {
        let description = match &self.scenario_title {
            Some(title) => format!("Scenario: {}", title),
            None => "Scenario:".to_string(),
        };

        ScenarioResult {
            title: self.scenario_title.clone(),
            description,
            step_results: format_step_results(&self.step_outcomes, self.scenario_title.is_some()),
        }
    }
}
