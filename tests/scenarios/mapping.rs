//! Test: Mapping - projections between steps

use crate::helpers::*;
use scenario_pipe::{Outcome, Scenario};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A projection carries the value without adding a log entry
#[test]
fn test_map_does_not_record_a_step() {
    let pipe = Scenario::untitled()
        .given("a list", |()| Ok::<_, anyhow::Error>(vec![3, 1, 2]))
        .map(|mut list| {
            list.sort();
            list
        })
        .then("it is sorted", |list| Ok::<_, anyhow::Error>(list));

    let (result, lines) = run_captured(pipe);

    assert_eq!(result.unwrap().output, vec![1, 2, 3]);
    assert_lines(&lines, &["Given a list [Passed]", "Then it is sorted [Passed]"]);
}

/// A failing projection reclassifies the previous step in place
#[test]
fn test_failing_map_reclassifies_previous_step() {
    let pipe = Scenario::new("Projection")
        .given("a value", |()| Ok::<_, anyhow::Error>("12a".to_string()))
        .try_map(|text| text.parse::<i32>())
        .then("it is used", |n| Ok::<_, anyhow::Error>(n));

    let (result, lines) = run_captured(pipe);

    assert_lines(
        &lines,
        &[
            "Scenario: Projection",
            "  Given a value [Failed]",
            "  Then it is used [not run]",
        ],
    );
    assert_eq!(expect_step_error(result).kind(), "ParseIntError");
}

/// A panicking projection is captured too
#[test]
fn test_panicking_map_reclassifies() {
    let log = outcome_log(
        Scenario::untitled()
            .given("", |()| Ok::<_, anyhow::Error>(Vec::<i32>::new()))
            .map(|list| list[0]),
    );
    assert_eq!(outcomes_of(&log), vec![Outcome::Fail]);
}

/// Mapping an errored pipe never calls the projection
#[test]
fn test_map_on_errored_pipe_is_not_invoked() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();

    let log = outcome_log(
        Scenario::untitled()
            .given("", |()| Err::<i32, _>(anyhow::anyhow!("nope")))
            .map(move |n| {
                flag.store(true, Ordering::SeqCst);
                n + 1
            }),
    );

    assert_eq!(outcomes_of(&log), vec![Outcome::Fail]);
    assert!(!called.load(Ordering::SeqCst));
}

/// Projections compose onto pending pipes
#[tokio::test]
async fn test_map_after_async_step() {
    let pipe = Scenario::untitled()
        .given_async("", |()| async { Ok::<_, anyhow::Error>(20) })
        .map(|n| n + 1);

    let (result, _) = run_captured_async(pipe).await;
    assert_eq!(result.unwrap().output, 21);
}
