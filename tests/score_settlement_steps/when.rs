//! When steps for score settlement scenarios.

use super::world::{SettlementWorld, parse_points, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use teamboard::identity::Caller;
use teamboard::task::services::TaskUpdate;

#[when(r#""{voter}" votes "{score}" on the task"#)]
fn member_votes(
    world: &mut SettlementWorld,
    voter: String,
    score: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&voter)?;
    let task_id = world.task_id()?;
    let points = parse_points(&score)?;
    run_async(world.board.settlement().record_vote(caller, task_id, points))
        .wrap_err("record vote")?;
    Ok(())
}

#[when(r#""{reviewer}" reviews the task with {score:u8}"#)]
fn member_reviews(
    world: &mut SettlementWorld,
    reviewer: String,
    score: u8,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&reviewer)?;
    let task_id = world.task_id()?;
    if let Err(err) = run_async(
        world
            .board
            .settlement()
            .record_review(caller, task_id, score),
    ) {
        world.last_error = Some(err);
    }
    Ok(())
}

#[when(r#"the task total is changed to "{total}""#)]
fn total_is_changed(world: &mut SettlementWorld, total: String) -> Result<(), eyre::Report> {
    let points = parse_points(&total)?;
    let task_id = world.task_id()?;
    run_async(world.board.update_task(
        Caller::Anonymous,
        task_id,
        TaskUpdate::new().with_total_score(points),
    ))
    .wrap_err("change task total")?;
    Ok(())
}
