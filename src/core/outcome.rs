//! Step verbs, outcomes and the result shapes reported after a run

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword a step is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Given,
    When,
    Then,
    And,
    But,
}

impl Verb {
    pub fn name(&self) -> &'static str {
        match self {
            Verb::Given => "Given",
            Verb::When => "When",
            Verb::Then => "Then",
            Verb::And => "And",
            Verb::But => "But",
        }
    }

    /// `And` and `But` continue the previous verb and are indented under it
    pub fn is_conjunction(&self) -> bool {
        matches!(self, Verb::And | Verb::But)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
    Inconclusive,
    NotRun,
}

impl Outcome {
    /// Text used inside the `[...]` tag of a log line
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "Passed",
            Outcome::Fail => "Failed",
            Outcome::Inconclusive => "Inconclusive",
            Outcome::NotRun => "not run",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a scenario's outcome log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: Verb,
    pub outcome: Outcome,
    pub text: Option<String>,
}

impl StepOutcome {
    pub fn new(step: Verb, outcome: Outcome, text: Option<String>) -> Self {
        Self { step, outcome, text }
    }

    /// Same entry with a different classification
    pub fn reclassified(&self, outcome: Outcome) -> Self {
        Self {
            outcome,
            ..self.clone()
        }
    }
}

/// A formatted step line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: Verb,
    pub outcome: Outcome,
    pub title: Option<String>,
    /// Indented log line, e.g. `"    And Nothing [Passed]"`
    pub description: String,
}

/// Report of a finished scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub title: Option<String>,
    /// `"Scenario:"`, suffixed with the title when there is one
    pub description: String,
    pub step_results: Vec<StepResult>,
}

impl ScenarioResult {
    pub fn has_failures(&self) -> bool {
        self.step_results
            .iter()
            .any(|r| matches!(r.outcome, Outcome::Fail | Outcome::Inconclusive))
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.step_results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Lines as they are written to a log sink
    pub fn lines(&self) -> Vec<String> {
        crate::report::render_lines(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
