//! Test: Inconclusive - skipped work is reported apart from failures

use crate::helpers::*;
use scenario_pipe::{
    inconclusive, ClassifierConfig, Inconclusive, NameClassifier, Outcome, PatternConfig,
    Scenario, StepError,
};
use std::fmt;

#[derive(Debug)]
struct SkippableNetworkException;

impl fmt::Display for SkippableNetworkException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network unavailable")
    }
}

impl std::error::Error for SkippableNetworkException {}

/// Given passes, When is inconclusive, Then never runs
#[test]
fn test_inconclusive_step_stops_chain() {
    let pipe = Scenario::new("Needs a fixture")
        .given("a running service", |()| Ok::<_, anyhow::Error>(8080))
        .when("the fixture is missing", |_port| {
            Err::<u16, _>(Inconclusive::new("fixture not installed"))
        })
        .then("the response is checked", |port| Ok::<_, anyhow::Error>(port));

    let (result, lines) = run_captured(pipe);

    assert_lines(
        &lines,
        &[
            "Scenario: Needs a fixture",
            "  Given a running service [Passed]",
            "  When the fixture is missing [Inconclusive]",
            "  Then the response is checked [not run]",
        ],
    );

    let error = expect_step_error(result);
    assert_eq!(error.kind(), "Inconclusive");
    assert_eq!(error.message(), "fixture not installed");
    assert!(error.is::<Inconclusive>());
}

/// Raising the marker from deep inside a step works like returning it
#[test]
fn test_inconclusive_raised_from_helper() {
    fn require_env(name: &str) -> String {
        std::env::var(name).unwrap_or_else(|_| inconclusive(format!("{} is not set", name)))
    }

    let pipe = Scenario::untitled()
        .given("the token", |()| Ok::<_, anyhow::Error>(require_env("SCENARIO_PIPE_UNSET_VAR")));

    let (result, lines) = run_captured(pipe);

    assert_lines(&lines, &["Given the token [Inconclusive]"]);
    let error = expect_step_error(result);
    assert_eq!(error.message(), "SCENARIO_PIPE_UNSET_VAR is not set");
    assert!(error.location().unwrap().file.ends_with("inconclusive.rs"));
}

/// The default classifier recognises the wildcard convention
#[test]
fn test_default_pattern_marks_skippable_errors() {
    let log = outcome_log(
        Scenario::untitled().given("", |()| Err::<(), _>(SkippableNetworkException)),
    );
    assert_eq!(outcomes_of(&log), vec![Outcome::Inconclusive]);
}

fn connect() -> Result<u16, SkippableNetworkException> {
    Err(SkippableNetworkException)
}

/// Errors propagated with `?` into `anyhow::Result` are recognised once
/// their type is registered
#[test]
fn test_registered_type_recognised_inside_anyhow_step() {
    let unregistered = outcome_log(Scenario::untitled().given("a connection", |()| -> anyhow::Result<u16> {
        let port = connect()?;
        Ok(port)
    }));
    assert_eq!(outcomes_of(&unregistered), vec![Outcome::Fail]);

    let classifier = NameClassifier::default().with_error_type::<SkippableNetworkException>();
    let pipe = Scenario::untitled()
        .with_classifier(classifier)
        .given("a connection", |()| -> anyhow::Result<u16> {
            let port = connect()?;
            Ok(port)
        })
        .then("it is used", |port| Ok::<_, anyhow::Error>(port));

    let (result, lines) = run_captured(pipe);

    assert_lines(&lines, &["Given a connection [Inconclusive]", "Then it is used [not run]"]);
    let error = expect_step_error(result);
    assert_eq!(error.message(), "network unavailable");
    assert!(error.is::<SkippableNetworkException>());
}

/// Classification rules can be loaded from configuration
#[test]
fn test_configured_classifier() {
    let yaml = r#"
known_names:
  - "ParseIntError"
patterns: []
"#;
    let config = ClassifierConfig::from_yaml(yaml).unwrap();
    let classifier = NameClassifier::from_config(&config).unwrap();

    let parse = outcome_log(
        Scenario::untitled()
            .with_classifier(classifier.clone())
            .given("", |()| "x".parse::<i32>()),
    );
    let skippable = outcome_log(
        Scenario::untitled()
            .with_classifier(classifier)
            .given("", |()| Err::<(), _>(SkippableNetworkException)),
    );

    assert_eq!(outcomes_of(&parse), vec![Outcome::Inconclusive]);
    assert_eq!(outcomes_of(&skippable), vec![Outcome::Fail]);
}

/// Config patterns may be regular expressions
#[test]
fn test_regex_pattern_config() {
    let config = ClassifierConfig::default().with_pattern(PatternConfig::regex("^Flaky[A-Z]"));
    let classifier = NameClassifier::from_config(&config).unwrap();

    assert!(classifier.is_inconclusive("FlakyTimeout"));
    assert!(classifier.is_inconclusive("SkipException"));
    assert!(!classifier.is_inconclusive("Flaky"));
}

/// A closure classifier can decide on the message
#[test]
fn test_closure_classifier() {
    let log = outcome_log(
        Scenario::untitled()
            .with_classifier(|e: &StepError| {
                if e.message().starts_with("pending:") {
                    Outcome::Inconclusive
                } else {
                    Outcome::Fail
                }
            })
            .given("", |()| Err::<(), _>(anyhow::anyhow!("pending: waiting on design"))),
    );
    assert_eq!(outcomes_of(&log), vec![Outcome::Inconclusive]);
}
