//! Then steps for score settlement scenarios.

use super::world::{SettlementWorld, parse_points, run_async};
use rstest_bdd_macros::then;

#[then(r#"the task total is "{total}""#)]
fn task_total_is(world: &SettlementWorld, total: String) -> Result<(), eyre::Report> {
    let expected = parse_points(&total)?;
    let task = run_async(world.board.get_task(world.task_id()?))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    eyre::ensure!(
        task.total_score() == expected,
        "expected total {expected}, found {}",
        task.total_score()
    );
    Ok(())
}

#[then(r#"the achieved score is "{achieved}""#)]
fn achieved_score_is(world: &SettlementWorld, achieved: String) -> Result<(), eyre::Report> {
    let expected = parse_points(&achieved)?;
    let task = run_async(world.board.get_task(world.task_id()?))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    eyre::ensure!(
        task.achieved_score() == Some(expected),
        "expected achieved score {expected}, found {:?}",
        task.achieved_score()
    );
    Ok(())
}

#[then("the task has no achieved score")]
fn no_achieved_score(world: &SettlementWorld) -> Result<(), eyre::Report> {
    let task = run_async(world.board.get_task(world.task_id()?))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    eyre::ensure!(
        task.achieved_score().is_none(),
        "expected no achieved score, found {:?}",
        task.achieved_score()
    );
    Ok(())
}

#[then(r#"the last action fails as "{kind}""#)]
fn last_action_fails(world: &SettlementWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last action to fail"))?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected failure kind {kind}, found {} ({err})",
        err.kind()
    );
    Ok(())
}
