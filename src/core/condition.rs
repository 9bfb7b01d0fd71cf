//! Name patterns used to recognise inconclusive failures

use regex::Regex;

/// Pattern matched against an error's kind name
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Whole-name match
    Exact(String),
    /// Regular expression match
    Regex(Regex),
}

impl NamePattern {
    /// Compile a wildcard pattern where `*` matches any run of characters,
    /// e.g. `Skippable*Exception`
    pub fn wildcard(pattern: &str) -> Result<Self, regex::Error> {
        if !pattern.contains('*') {
            return Ok(NamePattern::Exact(pattern.to_string()));
        }

        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        Regex::new(&format!("^{}$", body)).map(NamePattern::Regex)
    }

    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(NamePattern::Regex)
    }

    /// Check if the pattern matches the given name
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(expected) => expected == name,
            NamePattern::Regex(regex) => regex.is_match(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NamePattern::Exact(s) => s,
            NamePattern::Regex(r) => r.as_str(),
        }
    }
}
