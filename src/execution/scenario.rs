//! Scenario entry point

use crate::{
    core::Container,
    execution::{classify::Classify, executor::StepExecutor, pipe::Pipe},
};
use std::future::Future;
use std::sync::Arc;

/// Starting point of a step chain.
///
/// A titled scenario prints a `Scenario: <title>` header and indents its
/// steps under it; an untitled one prints the steps alone.
#[derive(Debug, Clone)]
pub struct Scenario {
    title: Option<String>,
    executor: StepExecutor,
}

impl Scenario {
    /// A scenario with a title. A blank title is treated as no title.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            title: (!title.trim().is_empty()).then_some(title),
            executor: StepExecutor::default(),
        }
    }

    pub fn untitled() -> Self {
        Self {
            title: None,
            executor: StepExecutor::default(),
        }
    }

    /// Decide between `Fail` and `Inconclusive` with `classifier`
    pub fn with_classifier(mut self, classifier: impl Classify + 'static) -> Self {
        self.executor = StepExecutor::new(Arc::new(classifier));
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The empty, ready pipe the first step runs against
    pub fn into_pipe(self) -> Pipe<()> {
        Pipe::from_container(Container::new((), self.title)).with_executor(self.executor)
    }

    /// Start the chain with a synchronous `Given` step
    #[track_caller]
    pub fn given<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(()) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.into_pipe().given(title, f)
    }

    /// Start the chain with an asynchronous `Given` step
    #[track_caller]
    pub fn given_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(()) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.into_pipe().given_async(title, f)
    }
}
