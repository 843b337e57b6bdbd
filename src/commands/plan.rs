//! `jconverge plan` - compute and display a convergence plan.

use crate::cli::{OutputFormat, PlanArgs};
use crate::config;
use crate::report;
use anyhow::Result;
use convergence::{DesiredState, Host, PolicyTable};

/// Resolve the host from CLI args and layer caller overrides onto the
/// table's desired state.
///
/// A repeatable `--extra-package` flag cannot express "explicitly empty",
/// so an empty list counts as "not provided".
pub fn desired_for(args: &PlanArgs, table: &PolicyTable) -> Result<(Host, DesiredState)> {
    let host = Host::new(&args.host.family, &args.host.os_version);
    let key = convergence::resolve(&host, table)?;
    log::debug!("{host} resolved to policy key {key}");

    let extra = if args.extra_packages.is_empty() {
        None
    } else {
        Some(args.extra_packages.clone())
    };
    let desired = table
        .lookup(&key)?
        .with_overrides(args.java_home.clone(), extra);
    Ok((host, desired))
}

pub fn run(table: &PolicyTable, args: &PlanArgs) -> Result<()> {
    let (host, desired) = desired_for(args, table)?;
    let observed = config::load_observed(args.state.as_deref())?;
    let actions = convergence::plan(&desired, &observed);
    log::info!("{host}: {} actions planned", actions.len());

    match args.format {
        OutputFormat::Text => {
            report::display_plan(&actions);
            Ok(())
        }
        OutputFormat::Json => report::display_plan_json(&actions),
    }
}
