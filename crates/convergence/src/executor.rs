//! Execution boundary - applies plans and reports results.
//!
//! The planner only emits actions; an [`Executor`] turns them into effects.
//! Real package-manager and filesystem executors live outside this crate.
//! [`SimulatedExecutor`] applies a plan to an in-memory state snapshot and
//! is what the CLI's `apply` command and the idempotence tests use.
//!
//! Application is strictly sequential: later actions may depend on effects
//! of earlier ones, so a single host's plan is never parallelized.

use crate::error::Error;
use crate::notify::{NotificationBus, NotificationEvent};
use crate::types::{Action, ObservedState};
use std::path::Path;

/// Boundary that applies individual actions.
///
/// Retry and timeout policy belongs to implementations; the planner never
/// retries.
pub trait Executor {
    fn install_package(&mut self, name: &str) -> Result<(), Error>;
    fn set_alternative(&mut self, target: &str) -> Result<(), Error>;
    fn write_file(&mut self, path: &Path) -> Result<(), Error>;
    fn delete_file(&mut self, path: &Path) -> Result<(), Error>;
    fn include_policy(&mut self, key: &str) -> Result<(), Error>;
    fn notify(&mut self, event: &NotificationEvent) -> Result<(), Error>;
}

/// Apply a plan in order through an executor.
///
/// Stops at the first failing action; partial application is an executor
/// concern, the plan itself stays valid.
///
/// Returns the number of actions applied.
pub fn apply<E: Executor>(plan: &[Action], executor: &mut E) -> Result<usize, Error> {
    for action in plan {
        match action {
            Action::InstallPackage(name) => executor.install_package(name)?,
            Action::SetAlternative(target) => executor.set_alternative(target)?,
            Action::WriteFile(path) => executor.write_file(path)?,
            Action::DeleteFile(path) => executor.delete_file(path)?,
            Action::IncludePolicy(key) => executor.include_policy(key)?,
            Action::EmitNotification(name) => executor.notify(&NotificationEvent {
                name: name.clone(),
                triggered_by: action.clone(),
            })?,
        }
    }
    Ok(plan.len())
}

/// Executor that mutates an in-memory [`ObservedState`] snapshot.
///
/// Sub-policy inclusions are recorded rather than recursively expanded;
/// notifications go out on the owned [`NotificationBus`].
#[derive(Debug, Default)]
pub struct SimulatedExecutor {
    state: ObservedState,
    bus: NotificationBus,
}

impl SimulatedExecutor {
    /// Start from an observed snapshot.
    pub fn new(state: ObservedState) -> Self {
        Self {
            state,
            bus: NotificationBus::new(),
        }
    }

    /// The bus notifications are published on; subscribe before applying.
    pub fn bus_mut(&mut self) -> &mut NotificationBus {
        &mut self.bus
    }

    /// Current state snapshot.
    pub fn state(&self) -> &ObservedState {
        &self.state
    }

    /// Consume the executor, yielding the updated snapshot.
    pub fn into_state(self) -> ObservedState {
        self.state
    }
}

impl Executor for SimulatedExecutor {
    fn install_package(&mut self, name: &str) -> Result<(), Error> {
        self.state.installed_packages.insert(name.to_string());
        Ok(())
    }

    fn set_alternative(&mut self, target: &str) -> Result<(), Error> {
        self.state.current_alternative = Some(target.to_string());
        Ok(())
    }

    fn write_file(&mut self, path: &Path) -> Result<(), Error> {
        self.state.existing_files.insert(path.to_path_buf());
        Ok(())
    }

    fn delete_file(&mut self, path: &Path) -> Result<(), Error> {
        self.state.existing_files.remove(path);
        Ok(())
    }

    fn include_policy(&mut self, key: &str) -> Result<(), Error> {
        self.state.applied_policies.insert(key.to_string());
        Ok(())
    }

    fn notify(&mut self, event: &NotificationEvent) -> Result<(), Error> {
        self.bus.publish(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{self, LICENSE_MARKER_PATH, VERSION_CHANGED_EVENT};
    use crate::types::DesiredState;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn debian_desired() -> DesiredState {
        DesiredState::new(
            ["openjdk-8-jdk", "openjdk-8-jre-headless"],
            Some("java-1.8.0-openjdk-amd64"),
        )
        .with_default_symlink()
    }

    #[test]
    fn apply_reaches_converged_state() {
        let desired = debian_desired();
        let actions = planner::plan(&desired, &ObservedState::default());

        let mut executor = SimulatedExecutor::default();
        let applied = apply(&actions, &mut executor).unwrap();
        assert_eq!(applied, actions.len());

        let state = executor.state();
        assert!(state.installed_packages.contains("openjdk-8-jdk"));
        assert_eq!(
            state.current_alternative.as_deref(),
            Some("java-1.8.0-openjdk-amd64")
        );
    }

    #[test]
    fn replan_after_apply_is_empty() {
        let desired = debian_desired();
        let mut observed = ObservedState::default();
        observed
            .existing_files
            .insert(PathBuf::from(LICENSE_MARKER_PATH));

        let actions = planner::plan(&desired, &observed);
        let mut executor = SimulatedExecutor::new(observed);
        apply(&actions, &mut executor).unwrap();

        let converged = executor.into_state();
        assert!(planner::plan(&desired, &converged).is_empty());
    }

    #[test]
    fn version_change_notification_reaches_subscriber() {
        let desired = debian_desired();
        let actions = planner::plan(&desired, &ObservedState::default());

        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut executor = SimulatedExecutor::default();
        executor.bus_mut().subscribe(VERSION_CHANGED_EVENT, move |e| {
            sink.borrow_mut().push(format!("{}", e.triggered_by));
        });

        apply(&actions, &mut executor).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn stale_license_marker_is_gone_after_apply() {
        let mut observed = ObservedState::default();
        observed
            .existing_files
            .insert(PathBuf::from(LICENSE_MARKER_PATH));

        let desired = debian_desired();
        let actions = planner::plan(&desired, &observed);
        let mut executor = SimulatedExecutor::new(observed);
        apply(&actions, &mut executor).unwrap();

        assert!(executor.state().existing_files.is_empty());
    }

    #[test]
    fn inclusions_are_recorded() {
        let desired = debian_desired();
        let actions = planner::plan(&desired, &ObservedState::default());
        let mut executor = SimulatedExecutor::default();
        apply(&actions, &mut executor).unwrap();

        let state = executor.state();
        assert!(
            state
                .applied_policies
                .contains(planner::DERIVE_ATTRIBUTES_POLICY)
        );
        assert!(
            state
                .applied_policies
                .contains(planner::DEFAULT_JAVA_SYMLINK_POLICY)
        );
    }

    /// Executor that fails on the first package install.
    #[derive(Debug, Default)]
    struct FailingExecutor {
        attempted: usize,
    }

    impl Executor for FailingExecutor {
        fn install_package(&mut self, name: &str) -> Result<(), Error> {
            self.attempted += 1;
            Err(Error::ActionExecution {
                action: format!("install_package {name}"),
                message: "package manager unavailable".to_string(),
            })
        }

        fn set_alternative(&mut self, _: &str) -> Result<(), Error> {
            self.attempted += 1;
            Ok(())
        }

        fn write_file(&mut self, _: &Path) -> Result<(), Error> {
            self.attempted += 1;
            Ok(())
        }

        fn delete_file(&mut self, _: &Path) -> Result<(), Error> {
            self.attempted += 1;
            Ok(())
        }

        fn include_policy(&mut self, _: &str) -> Result<(), Error> {
            self.attempted += 1;
            Ok(())
        }

        fn notify(&mut self, _: &NotificationEvent) -> Result<(), Error> {
            self.attempted += 1;
            Ok(())
        }
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let desired = debian_desired();
        let actions = planner::plan(&desired, &ObservedState::default());

        let mut executor = FailingExecutor::default();
        let err = apply(&actions, &mut executor).unwrap_err();
        assert!(matches!(err, Error::ActionExecution { .. }));
        assert!(!err.is_planning_failure());
        assert_eq!(executor.attempted, 1);
    }
}
