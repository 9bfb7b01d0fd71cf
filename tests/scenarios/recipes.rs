//! Test: Recipes - reusable step groups

use crate::helpers::*;
use scenario_pipe::{compose, Pipe, Scenario};

fn logged_in(pipe: Pipe<()>) -> Pipe<String> {
    pipe.given("a registered user", |()| Ok::<_, anyhow::Error>("alice".to_string()))
        .and("the user is logged in", |user| Ok::<_, anyhow::Error>(user))
}

fn with_basket(pipe: Pipe<String>) -> Pipe<(String, Vec<&'static str>)> {
    pipe.and("a basket with one item", |user| Ok::<_, anyhow::Error>((user, vec!["book"])))
}

fn checked_out(pipe: Pipe<(String, Vec<&'static str>)>) -> Pipe<usize> {
    pipe.when("the basket is checked out", |(_, items)| Ok::<_, anyhow::Error>(items.len()))
}

/// Applying recipes prints the same log as inline steps
#[test]
fn test_recipes_match_inline_steps() {
    let (_, inline) = run_captured(
        Scenario::new("Shop")
            .given("a registered user", |()| Ok::<_, anyhow::Error>("alice".to_string()))
            .and("the user is logged in", |user| Ok::<_, anyhow::Error>(user))
            .and("a basket with one item", |user| Ok::<_, anyhow::Error>((user, vec!["book"])))
            .when("the basket is checked out", |(_, items)| {
                Ok::<_, anyhow::Error>(items.len())
            }),
    );

    let (result, via_recipes) = run_captured(
        Scenario::new("Shop")
            .into_pipe()
            .apply(logged_in)
            .apply(with_basket)
            .apply(checked_out),
    );

    assert_eq!(result.unwrap().output, 1);
    assert_eq!(inline, via_recipes);
}

/// Grouping of recipe composition does not change the log
#[test]
fn test_recipe_composition_is_associative() {
    let left = outcome_log(
        Scenario::new("Shop")
            .into_pipe()
            .apply(compose(compose(logged_in, with_basket), checked_out)),
    );
    let right = outcome_log(
        Scenario::new("Shop")
            .into_pipe()
            .apply(compose(logged_in, compose(with_basket, checked_out))),
    );

    assert_eq!(left, right);
    assert_eq!(left.len(), 4);
}
