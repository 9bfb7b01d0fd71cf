//! Scenario-based tests for scenario-pipe

mod async_steps;
mod inconclusive;
mod mapping;
mod recipes;
