//! Terminal calls - resolve a pipe, write its log and hand back the result

use crate::{
    core::{Either, Error, Outcome, ScenarioResult},
    execution::pipe::{Pipe, PipeState},
    report::{emit, ConsoleSink, LogSink},
};
use tracing::{info, warn};

/// Final value of a successful scenario together with its report
#[derive(Debug)]
pub struct ScenarioOutput<T> {
    pub output: T,
    pub result: ScenarioResult,
}

impl<T: Send + 'static> Pipe<T> {
    /// Resolve the chain, blocking if needed, and print the log to stdout.
    ///
    /// On failure the originally captured step error is returned after the
    /// log has been written.
    pub fn run(self) -> Result<ScenarioOutput<T>, Error> {
        self.run_with(&ConsoleSink::default())
    }

    /// Like [`Pipe::run`], writing the log to `sink`
    pub fn run_with(self, sink: &dyn LogSink) -> Result<ScenarioOutput<T>, Error> {
        let state = self.resolve_blocking()?;
        finish(state, sink)
    }

    /// Resolve the chain without blocking and print the log to stdout
    pub async fn run_async(self) -> Result<ScenarioOutput<T>, Error> {
        let sink = ConsoleSink::default();
        self.run_async_with(&sink).await
    }

    /// Like [`Pipe::run_async`], writing the log to `sink`
    pub async fn run_async_with(self, sink: &dyn LogSink) -> Result<ScenarioOutput<T>, Error> {
        let state = self.resolve().await;
        finish(state, sink)
    }
}

fn finish<T>(state: PipeState<T>, sink: &dyn LogSink) -> Result<ScenarioOutput<T>, Error> {
    match state {
        Either::Right(container) => {
            let result = container.to_scenario_result();
            emit(&result.lines(), sink);
            info!(
                "Scenario finished: {} ({} steps passed)",
                result.description,
                result.count(Outcome::Pass)
            );
            Ok(ScenarioOutput {
                output: container.into_content(),
                result,
            })
        }
        Either::Left(failed) => {
            let result = failed.to_scenario_result();
            emit(&result.lines(), sink);
            let error = failed.into_content();
            warn!(
                "Scenario failed: {} ({} not run): {}",
                result.description,
                result.count(Outcome::NotRun),
                error
            );
            Err(Error::Step(error))
        }
    }
}
