//! Given steps for score settlement scenarios.

use super::world::{SettlementWorld, parse_points, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use teamboard::identity::Caller;
use teamboard::member::{
    domain::{Member, MemberId, MemberName},
    ports::MemberRepository,
};
use teamboard::task::services::{ReportSubmission, TaskUpdate};

#[given(r#"a team of "{names}""#)]
fn a_team_of(world: &mut SettlementWorld, names: String) -> Result<(), eyre::Report> {
    for raw in names.split(',') {
        let name = MemberName::new(raw).wrap_err("valid member name")?;
        let member = Member::new(MemberId::new(), name);
        run_async(world.members.store(&member)).wrap_err("store team member")?;
        world
            .team
            .insert(member.name().as_str().to_owned(), member.id());
    }
    Ok(())
}

#[given(r#""{assignee}" has claimed a task titled "{title}""#)]
fn claimed_task(
    world: &mut SettlementWorld,
    assignee: String,
    title: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&assignee)?;
    let task = run_async(world.board.create_task(caller, title, None)).wrap_err("create task")?;
    run_async(world.board.claim_task(caller, task.id())).wrap_err("claim task")?;
    world.task = Some(task.id());
    Ok(())
}

#[given(r#""{author}" has reported progress on the task"#)]
fn reported_progress(world: &mut SettlementWorld, author: String) -> Result<(), eyre::Report> {
    let caller = world.caller(&author)?;
    let task_id = world.task_id()?;
    run_async(world.board.submit_report(
        caller,
        task_id,
        ReportSubmission::new("Progress", "First milestone reached"),
    ))
    .wrap_err("submit report")?;
    Ok(())
}

#[given(r#"the task total is set to "{total}""#)]
fn total_is_set(world: &mut SettlementWorld, total: String) -> Result<(), eyre::Report> {
    let points = parse_points(&total)?;
    let task_id = world.task_id()?;
    run_async(world.board.update_task(
        Caller::Anonymous,
        task_id,
        TaskUpdate::new().with_total_score(points),
    ))
    .wrap_err("set task total")?;
    Ok(())
}
