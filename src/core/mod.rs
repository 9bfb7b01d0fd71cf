//! Core domain models
//!
//! This module defines the value types a scenario is built from: the
//! `Either` union, protected step invocation, the immutable `Container`
//! snapshot, step outcomes and classification configuration.

pub mod attempt;
pub mod condition;
pub mod config;
pub mod container;
pub mod either;
pub mod error;
pub mod outcome;
pub mod step;

pub use attempt::*;
pub use container::*;
pub use either::*;
pub use error::*;
pub use outcome::*;
pub use step::*;
