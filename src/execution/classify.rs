//! Failure classification
//!
//! When a step fails, a [`Classify`] implementation decides whether the
//! failure is a real `Fail` or only `Inconclusive` (skipped, ignored, not yet
//! decidable). Test-framework integrations plug in their own rules; the
//! default [`NameClassifier`] looks at the kind name of the captured error
//! and at the names of registered error types found in its cause chain.

use crate::core::attempt::short_type_name;
use crate::core::condition::NamePattern;
use crate::core::config::ClassifierConfig;
use crate::core::error::StepError;
use crate::core::outcome::Outcome;
use std::collections::HashSet;
use std::error::Error as StdError;

/// Maps a captured step failure to `Outcome::Fail` or `Outcome::Inconclusive`
pub trait Classify: Send + Sync {
    fn classify(&self, error: &StepError) -> Outcome;
}

impl<F> Classify for F
where
    F: Fn(&StepError) -> Outcome + Send + Sync,
{
    fn classify(&self, error: &StepError) -> Outcome {
        self(error)
    }
}

/// Classifies by error kind name: an exact set of known names plus patterns.
///
/// A step returning `anyhow::Result` reports the kind `Error`, which hides the
/// concrete type. Types registered with [`NameClassifier::with_error_type`]
/// are looked up in the original error's cause chain and their names are
/// matched against the same rules.
#[derive(Debug, Clone)]
pub struct NameClassifier {
    known_names: HashSet<String>,
    patterns: Vec<NamePattern>,
    error_types: Vec<ErrorType>,
}

#[derive(Clone, Copy)]
struct ErrorType {
    name: &'static str,
    matches: fn(&(dyn StdError + 'static)) -> bool,
}

impl std::fmt::Debug for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorType").field(&self.name).finish()
    }
}

fn is_type<E: StdError + 'static>(error: &(dyn StdError + 'static)) -> bool {
    error.is::<E>()
}

impl NameClassifier {
    pub fn from_config(config: &ClassifierConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let patterns = config
            .patterns
            .iter()
            .map(|p| p.compile())
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            known_names: config.known_names.iter().cloned().collect(),
            patterns,
            error_types: Vec::new(),
        })
    }

    /// Recognise `E` anywhere in a failure's cause chain by its short type name
    pub fn with_error_type<E: StdError + 'static>(mut self) -> Self {
        self.error_types.push(ErrorType {
            name: short_type_name(std::any::type_name::<E>()),
            matches: is_type::<E>,
        });
        self
    }

    /// Whether a kind name marks an inconclusive failure
    pub fn is_inconclusive(&self, kind: &str) -> bool {
        self.known_names.contains(kind) || self.patterns.iter().any(|p| p.matches(kind))
    }

    /// Names of registered types present in the original error's chain
    fn chain_names<'a>(&'a self, error: &'a StepError) -> impl Iterator<Item = &'static str> + 'a {
        error
            .original()
            .into_iter()
            .flat_map(|original| original.chain())
            .flat_map(move |cause| {
                self.error_types
                    .iter()
                    .filter(move |t| (t.matches)(cause))
                    .map(|t| t.name)
            })
    }
}

impl Default for NameClassifier {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        Self {
            known_names: config.known_names.iter().cloned().collect(),
            patterns: config
                .patterns
                .iter()
                .filter_map(|p| p.compile().ok())
                .collect(),
            error_types: Vec::new(),
        }
    }
}

impl Classify for NameClassifier {
    fn classify(&self, error: &StepError) -> Outcome {
        let inconclusive = self.is_inconclusive(error.kind())
            || self.chain_names(error).any(|name| self.is_inconclusive(name));
        if inconclusive {
            Outcome::Inconclusive
        } else {
            Outcome::Fail
        }
    }
}
