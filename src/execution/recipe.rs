//! Reusable step groups
//!
//! A recipe is nothing more than a function from one pipe to the next, built
//! with the ordinary verb calls. Applying a recipe records exactly the same
//! outcomes as writing its steps inline.

use crate::execution::pipe::Pipe;

/// A reusable group of steps
pub trait Recipe<T, R> {
    fn apply(self, pipe: Pipe<T>) -> Pipe<R>;
}

impl<T, R, F> Recipe<T, R> for F
where
    F: FnOnce(Pipe<T>) -> Pipe<R>,
{
    fn apply(self, pipe: Pipe<T>) -> Pipe<R> {
        self(pipe)
    }
}

impl<T: Send + 'static> Pipe<T> {
    /// Continue the chain with the steps of `recipe`
    pub fn apply<R>(self, recipe: impl Recipe<T, R>) -> Pipe<R> {
        recipe.apply(self)
    }
}

/// Recipe running `first` and then `second`
pub fn compose<A, B, C>(
    first: impl Recipe<A, B>,
    second: impl Recipe<B, C>,
) -> impl FnOnce(Pipe<A>) -> Pipe<C> {
    move |pipe| second.apply(first.apply(pipe))
}
