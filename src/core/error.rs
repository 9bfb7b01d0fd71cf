//! Error types for scenario execution

use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Errors surfaced to the caller of a pipe
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing
    #[error("invalid argument: {0} must be provided")]
    InvalidArgument(&'static str),

    /// A pending pipe was observed with a blocking call from a current-thread runtime
    #[error("cannot block on a pending pipe from inside a current-thread runtime; use the async entry points")]
    BlockingInCurrentThread,

    /// The runtime used to drive a pending pipe could not be started
    #[error("failed to start runtime for pending pipe: {0}")]
    Runtime(#[from] std::io::Error),

    /// A step failed; carries the originally captured failure
    #[error(transparent)]
    Step(#[from] StepError),
}

impl Error {
    /// The captured step failure, if this error came from a step
    pub fn as_step_error(&self) -> Option<&StepError> {
        match self {
            Error::Step(e) => Some(e),
            _ => None,
        }
    }
}

/// Source position a failure originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A failure captured while running a step.
///
/// Holds the diagnostic context of the original error so it can be reported
/// or re-raised at the end of the chain without pointing at the engine.
#[derive(Debug)]
pub struct StepError {
    kind: String,
    message: String,
    location: Option<SourceLocation>,
    source: Option<anyhow::Error>,
}

impl StepError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            location: None,
            source: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Short type name of the original error, or `panic` for a plain panic
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The original error value, when the failure carried one
    pub fn original(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    pub fn into_original(self) -> Option<anyhow::Error> {
        self.source
    }

    /// Whether the original error is of type `E`
    pub fn is<E>(&self) -> bool
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.source.as_ref().is_some_and(|e| e.is::<E>())
    }

    /// Raise this failure again as a panic carrying the original context
    pub fn rethrow(self) -> ! {
        panic!("{}", self)
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {})", location)?;
        }
        Ok(())
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Marks a step as inconclusive rather than failed.
///
/// Return it as the step's error, or raise it from deep inside a step with
/// [`inconclusive`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Inconclusive {
    reason: String,
}

impl Inconclusive {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Abort the current step as inconclusive.
///
/// The failure is attributed to the caller of this function.
#[track_caller]
pub fn inconclusive(reason: impl Into<String>) -> ! {
    std::panic::panic_any(Inconclusive::new(reason))
}
