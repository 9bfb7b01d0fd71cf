//! Step domain model

use crate::core::outcome::{Outcome, StepOutcome, Verb};
use std::panic::Location;

/// A single declared step: its verb, optional title and where it was declared
#[derive(Debug, Clone)]
pub struct Step {
    pub verb: Verb,

    /// Text after the verb; `None` when the step was declared without one
    pub title: Option<String>,

    /// Source position of the declaration, used to attribute returned errors
    pub location: &'static Location<'static>,
}

impl Step {
    /// Create a step declared at the caller's location.
    ///
    /// A blank title is treated as no title.
    #[track_caller]
    pub fn new(verb: Verb, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            verb,
            title: (!title.trim().is_empty()).then_some(title),
            location: Location::caller(),
        }
    }

    /// Log entry recording this step with the given outcome
    pub fn outcome(&self, outcome: Outcome) -> StepOutcome {
        StepOutcome::new(self.verb, outcome, self.title.clone())
    }
}
