//! Step execution: the pipe, its executor and the terminal run calls

pub mod classify;
pub mod executor;
pub mod pipe;
pub mod recipe;
pub mod runner;
mod runtime;
pub mod scenario;

pub use classify::{Classify, NameClassifier};
pub use executor::StepExecutor;
pub use pipe::{Pipe, PipeState};
pub use recipe::{compose, Recipe};
pub use runner::ScenarioOutput;
pub use scenario::Scenario;
