//! Two-case tagged union

use crate::core::error::Error;
use std::fmt;

/// Either a `Left` (conventionally the failure side) or a `Right` value.
///
/// There is no empty or default state: a value only exists once one of the
/// two cases has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Build a `Left` from an optional payload, rejecting a missing one
    pub fn try_left(value: Option<L>) -> Result<Self, Error> {
        value.map(Either::Left).ok_or(Error::InvalidArgument("left"))
    }

    /// Build a `Right` from an optional payload, rejecting a missing one
    pub fn try_right(value: Option<R>) -> Result<Self, Error> {
        value.map(Either::Right).ok_or(Error::InvalidArgument("right"))
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Dispatch to exactly one handler depending on the case
    pub fn match_with<T>(self, on_right: impl FnOnce(R) -> T, on_left: impl FnOnce(L) -> T) -> T {
        match self {
            Either::Right(r) => on_right(r),
            Either::Left(l) => on_left(l),
        }
    }

    /// Chain a computation on the `Right` case; `Left` passes through untouched
    pub fn bind<R2>(self, on_right: impl FnOnce(R) -> Either<L, R2>) -> Either<L, R2> {
        match self {
            Either::Right(r) => on_right(r),
            Either::Left(l) => Either::Left(l),
        }
    }

    /// Transform both cases into a new union
    pub fn bi_bind<L2, R2>(
        self,
        on_right: impl FnOnce(R) -> Either<L2, R2>,
        on_left: impl FnOnce(L) -> Either<L2, R2>,
    ) -> Either<L2, R2> {
        match self {
            Either::Right(r) => on_right(r),
            Either::Left(l) => on_left(l),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Right(r) => write!(f, "right({})", r),
            Either::Left(l) => write!(f, "left({})", l),
        }
    }
}
