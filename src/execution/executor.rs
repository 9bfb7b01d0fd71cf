//! Step executor - runs one step against the current pipe state

use crate::{
    core::{
        attempt, attempt_async, Attempt, Container, Either, Outcome, Step, StepError,
    },
    execution::{
        classify::{Classify, NameClassifier},
        pipe::PipeState,
    },
    report::step_label,
};
use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::sync::Arc;
use tracing::{debug, warn};

/// Executes steps: skips them after a failure, otherwise invokes them,
/// classifies what they raise and records the outcome
#[derive(Clone)]
pub struct StepExecutor {
    classifier: Arc<dyn Classify>,
}

impl StepExecutor {
    pub fn new(classifier: Arc<dyn Classify>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Arc<dyn Classify> {
        &self.classifier
    }

    /// Execute a synchronous step
    pub fn execute<T, R, E, F>(&self, state: PipeState<T>, step: &Step, f: F) -> PipeState<R>
    where
        F: FnOnce(T) -> Result<R, E>,
        E: Into<anyhow::Error>,
    {
        match state {
            Either::Left(failed) => Either::Left(self.skip(failed, step)),
            Either::Right(container) => {
                let (content, history) = container.take();
                debug!("Executing step: {}", label(step));
                let result = attempt(move || f(content), step.location);
                self.record(history, step, result)
            }
        }
    }

    /// Execute an asynchronous step
    pub async fn execute_async<T, R, E, F, Fut>(
        &self,
        state: PipeState<T>,
        step: &Step,
        f: F,
    ) -> PipeState<R>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Into<anyhow::Error>,
    {
        match state {
            Either::Left(failed) => Either::Left(self.skip(failed, step)),
            Either::Right(container) => {
                let (content, history) = container.take();
                debug!("Executing async step: {}", label(step));
                let result = attempt_async(move || f(content), step.location).await;
                self.record(history, step, result)
            }
        }
    }

    /// Project the content of a successful state without recording a step.
    ///
    /// A failing projection reclassifies the most recent outcome instead of
    /// appending one. A failed state is passed through and `f` is not called.
    pub fn map<T, R, E, F>(
        &self,
        state: PipeState<T>,
        f: F,
        site: &'static Location<'static>,
    ) -> PipeState<R>
    where
        F: FnOnce(T) -> Result<R, E>,
        E: Into<anyhow::Error>,
    {
        state.bind(|container| {
            let (content, history) = container.take();
            match attempt(move || f(content), site) {
                Ok(value) => Either::Right(history.map(|()| value)),
                Err(error) => {
                    let outcome = self.classify(&error);
                    warn!("Projection failed ({:?}): {}", outcome, error);
                    Either::Left(history.with_last_outcome(outcome).map(|()| error))
                }
            }
        })
    }

    fn skip(&self, failed: Container<StepError>, step: &Step) -> Container<StepError> {
        debug!("Skipping step after earlier failure: {}", label(step));
        let (error, history) = failed.take();
        history.with_appended_outcome(error, step.outcome(Outcome::NotRun))
    }

    fn record<R>(&self, history: Container<()>, step: &Step, result: Attempt<R>) -> PipeState<R> {
        match result {
            Ok(value) => {
                debug!("Step passed: {}", label(step));
                Either::Right(history.with_appended_outcome(value, step.outcome(Outcome::Pass)))
            }
            Err(error) => {
                let outcome = self.classify(&error);
                warn!("Step {:?}: {} - {}", outcome, label(step), error);
                Either::Left(history.with_appended_outcome(error, step.outcome(outcome)))
            }
        }
    }

    /// Anything other than `Inconclusive` counts as a failure
    fn classify(&self, error: &StepError) -> Outcome {
        match self.classifier.classify(error) {
            Outcome::Inconclusive => Outcome::Inconclusive,
            _ => Outcome::Fail,
        }
    }
}

impl Default for StepExecutor {
    fn default() -> Self {
        Self::new(Arc::new(NameClassifier::default()))
    }
}

impl fmt::Debug for StepExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepExecutor").finish_non_exhaustive()
    }
}

fn label(step: &Step) -> String {
    step_label(step.verb, step.title.as_deref())
}
