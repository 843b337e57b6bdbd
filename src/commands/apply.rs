//! `jconverge apply` - run a plan through the simulated executor.
//!
//! Real package-manager execution stays outside this tool; `apply` drives
//! the in-memory executor, which is enough to demonstrate notification
//! wiring and verify idempotence against a state snapshot.

use crate::cli::ApplyArgs;
use crate::commands::plan::desired_for;
use crate::config;
use crate::report;
use crate::ui;
use anyhow::Result;
use convergence::{PolicyTable, SimulatedExecutor, VERSION_CHANGED_EVENT};

pub fn run(table: &PolicyTable, args: &ApplyArgs) -> Result<()> {
    let (host, desired) = desired_for(&args.plan, table)?;
    let observed = config::load_observed(args.plan.state.as_deref())?;
    let actions = convergence::plan(&desired, &observed);

    report::display_plan(&actions);
    if args.dry_run || actions.is_empty() {
        return Ok(());
    }

    let mut executor = SimulatedExecutor::new(observed);
    executor.bus_mut().subscribe(VERSION_CHANGED_EVENT, |event| {
        log::info!("jdk version changed (triggered by {})", event.triggered_by);
    });

    let applied = convergence::apply(&actions, &mut executor)?;

    // A second plan against the updated snapshot must come back empty.
    let replan = convergence::plan(&desired, executor.state());
    println!();
    ui::success(&format!("{host}: applied {applied} actions"));
    if replan.is_empty() {
        ui::dim("state converged, re-plan is empty");
    } else {
        ui::warn(&format!("{} actions still pending after apply", replan.len()));
    }
    Ok(())
}
