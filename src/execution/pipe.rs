//! The pipe threaded through a scenario
//!
//! A [`Pipe`] holds either a success container or an error container, and
//! that state is either available now (`Ready`) or will be produced by a
//! future (`Pending`). Synchronous steps applied to a ready pipe run
//! immediately; the first asynchronous step turns the pipe pending and every
//! later step is composed onto the future without polling it. Nothing is
//! resolved until the pipe is observed with [`Pipe::match_with`],
//! [`Pipe::match_async`] or one of the `run` calls.
//!
//! # Step errors
//!
//! A step may fail with any `E: Into<anyhow::Error>`: `anyhow::Error` itself
//! or any `std::error::Error + Send + Sync + 'static`. A boxed
//! `Box<dyn std::error::Error + Send + Sync>` does not implement
//! `std::error::Error` and is not accepted directly; convert it with
//! `.map_err(|e| anyhow::anyhow!(e))`, which keeps the boxed error as the
//! source.
//!
//! # Example
//!
//! ```
//! use scenario_pipe::{Pipe, Container};
//!
//! let pipe = Pipe::from_container(Container::new(2, None))
//!     .when("doubled", |n| Ok::<_, anyhow::Error>(n * 2))
//!     .then("checked", |n| {
//!         assert_eq!(n, 4);
//!         Ok::<_, anyhow::Error>(n)
//!     });
//!
//! let value = pipe.match_with(|c| *c.content(), |_| -1).unwrap();
//! assert_eq!(value, 4);
//! ```

use crate::{
    core::{Container, Either, Error, Step, StepError, Verb},
    execution::{classify::Classify, executor::StepExecutor, runtime},
};
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::sync::Arc;

/// Resolved state of a pipe: a failed container or a successful one
pub type PipeState<T> = Either<Container<StepError>, Container<T>>;

enum Resolution<T> {
    Ready(PipeState<T>),
    Pending(BoxFuture<'static, PipeState<T>>),
}

/// A step chain in progress
pub struct Pipe<T> {
    resolution: Resolution<T>,
    executor: StepExecutor,
}

impl<T: Send + 'static> Pipe<T> {
    /// Ready pipe in the success state
    pub fn from_container(container: Container<T>) -> Self {
        Self::from_state(Either::Right(container))
    }

    /// Ready pipe in the given state
    pub fn from_state(state: PipeState<T>) -> Self {
        Self {
            resolution: Resolution::Ready(state),
            executor: StepExecutor::default(),
        }
    }

    /// Pending pipe resolved by `future`
    pub fn from_pending<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = PipeState<T>> + Send + 'static,
    {
        Self {
            resolution: Resolution::Pending(Box::pin(future)),
            executor: StepExecutor::default(),
        }
    }

    /// Use `classifier` for the steps that follow
    pub fn with_classifier(self, classifier: impl Classify + 'static) -> Self {
        self.with_executor(StepExecutor::new(Arc::new(classifier)))
    }

    pub(crate) fn with_executor(mut self, executor: StepExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.resolution, Resolution::Pending(_))
    }

    /// Observe the final state, blocking the caller while it is pending
    pub fn match_with<R>(
        self,
        on_value: impl FnOnce(Container<T>) -> R,
        on_error: impl FnOnce(Container<StepError>) -> R,
    ) -> Result<R, Error> {
        Ok(self.resolve_blocking()?.match_with(on_value, on_error))
    }

    /// Observe the final state, suspending while it is pending
    pub async fn match_async<R>(
        self,
        on_value: impl FnOnce(Container<T>) -> R,
        on_error: impl FnOnce(Container<StepError>) -> R,
    ) -> R {
        self.resolve().await.match_with(on_value, on_error)
    }

    /// Wait for the state without blocking the thread
    pub async fn resolve(self) -> PipeState<T> {
        match self.resolution {
            Resolution::Ready(state) => state,
            Resolution::Pending(future) => future.await,
        }
    }

    /// Wait for the state, blocking the calling thread if needed
    pub fn resolve_blocking(self) -> Result<PipeState<T>, Error> {
        match self.resolution {
            Resolution::Ready(state) => Ok(state),
            Resolution::Pending(future) => runtime::block_on(future),
        }
    }

    /// Continue with a synchronous transition; ready pipes stay ready
    fn chain<R>(
        self,
        advance: impl FnOnce(&StepExecutor, PipeState<T>) -> PipeState<R> + Send + 'static,
    ) -> Pipe<R> {
        let executor = self.executor;
        let resolution = match self.resolution {
            Resolution::Ready(state) => Resolution::Ready(advance(&executor, state)),
            Resolution::Pending(future) => {
                let next = executor.clone();
                Resolution::Pending(Box::pin(async move { advance(&next, future.await) }))
            }
        };

        Pipe {
            resolution,
            executor,
        }
    }

    /// Continue with an asynchronous transition; the result is always pending
    fn chain_async<R, Fut>(
        self,
        advance: impl FnOnce(StepExecutor, PipeState<T>) -> Fut + Send + 'static,
    ) -> Pipe<R>
    where
        Fut: Future<Output = PipeState<R>> + Send + 'static,
    {
        let executor = self.executor.clone();
        let next = executor.clone();
        let resolution = self.resolution;
        let future = async move {
            let state = match resolution {
                Resolution::Ready(state) => state,
                Resolution::Pending(future) => future.await,
            };
            advance(next, state).await
        };

        Pipe {
            resolution: Resolution::Pending(Box::pin(future)),
            executor,
        }
    }

    /// Run a synchronous step tagged with `verb`
    #[track_caller]
    pub fn step<R, E, F>(self, verb: Verb, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let step = Step::new(verb, title);
        self.chain(move |executor, state| executor.execute(state, &step, f))
    }

    /// Run an asynchronous step tagged with `verb`
    #[track_caller]
    pub fn step_async<R, E, F, Fut>(self, verb: Verb, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let step = Step::new(verb, title);
        self.chain_async(move |executor, state| async move {
            executor.execute_async(state, &step, f).await
        })
    }

    #[track_caller]
    pub fn given<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step(Verb::Given, title, f)
    }

    #[track_caller]
    pub fn when<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step(Verb::When, title, f)
    }

    #[track_caller]
    pub fn then<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step(Verb::Then, title, f)
    }

    #[track_caller]
    pub fn and<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step(Verb::And, title, f)
    }

    #[track_caller]
    pub fn but<R, E, F>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step(Verb::But, title, f)
    }

    #[track_caller]
    pub fn given_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step_async(Verb::Given, title, f)
    }

    #[track_caller]
    pub fn when_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step_async(Verb::When, title, f)
    }

    #[track_caller]
    pub fn then_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step_async(Verb::Then, title, f)
    }

    #[track_caller]
    pub fn and_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step_async(Verb::And, title, f)
    }

    #[track_caller]
    pub fn but_async<R, E, F, Fut>(self, title: impl Into<String>, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.step_async(Verb::But, title, f)
    }

    /// Project the content without recording a step.
    ///
    /// A panic in `f` reclassifies the most recent step as failed (or
    /// inconclusive); on a failed pipe `f` is never called.
    #[track_caller]
    pub fn map<R, F>(self, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> R + Send + 'static,
    {
        self.try_map(move |value| Ok::<R, Infallible>(f(value)))
    }

    /// Fallible projection; see [`Pipe::map`]
    #[track_caller]
    pub fn try_map<R, E, F>(self, f: F) -> Pipe<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Result<R, E> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let site = Location::caller();
        self.chain(move |executor, state| executor.map(state, f, site))
    }
}

impl<T> fmt::Debug for Pipe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.resolution {
            Resolution::Ready(Either::Right(_)) => "Ready(Value)",
            Resolution::Ready(Either::Left(_)) => "Ready(Error)",
            Resolution::Pending(_) => "Pending",
        };
        f.debug_struct("Pipe").field("state", &state).finish()
    }
}
