//! scenario-pipe - Given/When/Then step pipelines
//!
//! A scenario is a chain of steps. Each step runs against the value produced
//! by the previous one; the first failing step turns the rest of the chain
//! into `not run` entries, and the finished chain prints an outcome log:
//!
//! ```text
//! Scenario: Checkout
//!   Given a cart [Passed]
//!   When paying [Failed]
//!     And confirming [not run]
//! ```
//!
//! Steps may be synchronous or asynchronous and can be mixed freely. See
//! [`Scenario`] for the entry point and [`Pipe`] for the chaining API.

pub mod core;
pub mod execution;
pub mod report;

// Re-export commonly used types
pub use crate::core::config::{ClassifierConfig, PatternConfig};
pub use crate::core::{inconclusive, Container, Either, Error, Inconclusive, SourceLocation, StepError};
pub use crate::core::{Outcome, ScenarioResult, StepOutcome, StepResult, Verb};
pub use crate::execution::{compose, Classify, NameClassifier, Pipe, PipeState, Recipe, Scenario, ScenarioOutput};
pub use crate::report::{ConsoleSink, LogSink, MemorySink};
