//! Failure classification configuration from YAML

use crate::core::condition::NamePattern;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which error kinds count as inconclusive instead of failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Kind names recognised exactly
    #[serde(default)]
    pub known_names: Vec<String>,

    /// Additional name patterns
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

/// A single name pattern as written in YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Wildcard (`*`) pattern, or a regex when `use_regex` is set
    pub pattern: String,

    /// Whether to use regex pattern matching
    #[serde(default)]
    pub use_regex: bool,
}

impl PatternConfig {
    pub fn wildcard(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            use_regex: false,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            use_regex: true,
        }
    }

    pub fn compile(&self) -> Result<NamePattern> {
        let compiled = if self.use_regex {
            NamePattern::regex(&self.pattern)?
        } else {
            NamePattern::wildcard(&self.pattern)?
        };
        Ok(compiled)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            known_names: [
                "Inconclusive",
                "InconclusiveException",
                "AssertInconclusiveException",
                "IgnoreException",
                "SkipException",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            patterns: vec![PatternConfig::wildcard("Skippable*Exception")],
        }
    }
}

impl ClassifierConfig {
    /// Load classifier configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse classifier configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the classifier configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.known_names.iter().position(|n| n.trim().is_empty()) {
            anyhow::bail!("known_names[{}] is empty", i);
        }

        for (i, pattern) in self.patterns.iter().enumerate() {
            if pattern.pattern.trim().is_empty() {
                anyhow::bail!("patterns[{}] is empty", i);
            }
            if let Err(e) = pattern.compile() {
                anyhow::bail!("patterns[{}] '{}' is invalid: {}", i, pattern.pattern, e);
            }
        }

        Ok(())
    }

    /// Add a kind name to the exact-match list
    pub fn with_known_name(mut self, name: impl Into<String>) -> Self {
        self.known_names.push(name.into());
        self
    }

    pub fn with_pattern(mut self, pattern: PatternConfig) -> Self {
        self.patterns.push(pattern);
        self
    }
}
