//! Test: Async Steps - mixing synchronous and asynchronous steps

use crate::helpers::*;
use scenario_pipe::{Error, Outcome, Scenario};
use std::time::Duration;

async fn fetch_user(id: u32) -> anyhow::Result<String> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    Ok(format!("user-{}", id))
}

/// A mixed chain resolves in order when run asynchronously
#[tokio::test]
async fn test_mixed_chain_run_async() {
    let pipe = Scenario::new("Mixed")
        .given("an id", |()| Ok::<_, anyhow::Error>(7u32))
        .when_async("the user is fetched", |id| fetch_user(id))
        .and("the name is upper-cased", |name: String| Ok::<_, anyhow::Error>(name.to_uppercase()))
        .then_async("it is stored", |name| async move {
            tokio::task::yield_now().await;
            Ok::<_, anyhow::Error>(name.len())
        });

    assert!(pipe.is_pending());
    let (result, lines) = run_captured_async(pipe).await;

    assert_eq!(result.unwrap().output, 6);
    assert_lines(
        &lines,
        &[
            "Scenario: Mixed",
            "  Given an id [Passed]",
            "  When the user is fetched [Passed]",
            "    And the name is upper-cased [Passed]",
            "  Then it is stored [Passed]",
        ],
    );
}

/// Blocking run works from a multi-thread runtime
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_run_inside_multi_thread_runtime() {
    let pipe = Scenario::untitled().given_async("a user", |()| fetch_user(1));
    let (result, lines) = run_captured(pipe);

    assert_eq!(result.unwrap().output, "user-1");
    assert_lines(&lines, &["Given a user [Passed]"]);
}

/// Blocking run without any runtime starts its own
#[test]
fn test_blocking_run_without_runtime() {
    let pipe = Scenario::untitled()
        .given_async("a user", |()| fetch_user(2))
        .then("it has a name", |name| Ok::<_, anyhow::Error>(name));

    let (result, _) = run_captured(pipe);
    assert_eq!(result.unwrap().output, "user-2");
}

/// Blocking from a current-thread runtime is refused instead of deadlocking
#[tokio::test]
async fn test_blocking_run_in_current_thread_runtime_is_refused() {
    let pipe = Scenario::untitled().given_async("", |()| fetch_user(3));
    let (result, lines) = run_captured(pipe);

    assert!(matches!(result, Err(Error::BlockingInCurrentThread)));
    assert!(lines.is_empty());
}

/// Async failures and panics are recorded like synchronous ones
#[tokio::test]
async fn test_async_failure_skips_remaining_steps() {
    let pipe = Scenario::untitled()
        .given_async("a slow failure", |()| async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err::<u32, _>(anyhow::anyhow!("timed out"))
        })
        .when_async("never polled", |n| async move { Ok::<_, anyhow::Error>(n) })
        .then("never called", |n| Ok::<_, anyhow::Error>(n));

    let log = pipe
        .match_async(
            |c| c.step_outcomes().to_vec(),
            |c| c.step_outcomes().to_vec(),
        )
        .await;

    assert_eq!(
        outcomes_of(&log),
        vec![Outcome::Fail, Outcome::NotRun, Outcome::NotRun]
    );
}
