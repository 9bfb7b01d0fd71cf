//! Outcome log formatting

use crate::core::outcome::{ScenarioResult, StepOutcome, StepResult, Verb};

const INDENT: &str = "  ";

/// Format an outcome log into indented step lines.
///
/// `has_scenario` controls whether the top-level verbs are indented under a
/// `Scenario:` header.
pub fn format_step_results(outcomes: &[StepOutcome], has_scenario: bool) -> Vec<StepResult> {
    outcomes
        .iter()
        .map(|outcome| StepResult {
            step: outcome.step,
            outcome: outcome.outcome,
            title: outcome.text.clone(),
            description: format!(
                "{}{} [{}]",
                indent(outcome.step, has_scenario),
                step_label(outcome.step, outcome.text.as_deref()),
                outcome.outcome
            ),
        })
        .collect()
}

/// Label for a step: the verb alone, the verb followed by the title, or the
/// title as written when it already starts with the verb
pub fn step_label(verb: Verb, title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        None => verb.name().to_string(),
        Some(title) if starts_with_ignore_case(title, verb.name()) => title.to_string(),
        Some(title) => format!("{} {}", verb.name(), title),
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn indent(verb: Verb, has_scenario: bool) -> String {
    let scenario = if has_scenario { INDENT } else { "" };
    let conjunction = if verb.is_conjunction() { INDENT } else { "" };
    format!("{}{}", scenario, conjunction)
}

/// Lines written for a finished scenario: the header when the scenario has a
/// title, then every step in execution order
pub fn render_lines(result: &ScenarioResult) -> Vec<String> {
    let header = result.title.as_ref().map(|_| result.description.clone());
    header
        .into_iter()
        .chain(result.step_results.iter().map(|r| r.description.clone()))
        .collect()
}
