//! Convergence planner - diffs desired vs observed state and emits actions.
//!
//! The planner is a pure function: it performs no I/O, holds no state, and
//! produces an identical plan for identical inputs. Re-planning against a
//! state that already had the plan applied yields an empty list.

use crate::types::{Action, DesiredState, ObservedState};
use std::path::PathBuf;

/// Event published once per run when any package install was planned.
pub const VERSION_CHANGED_EVENT: &str = "version-changed";

/// Sub-policy that computes java_home and package names from the installed
/// version. Suppressed entirely when the caller overrode both fields.
pub const DERIVE_ATTRIBUTES_POLICY: &str = "derive-attributes-from-version";

/// Sub-policy installing the default-binary symlink on families that
/// support the convention (Debian family). RHEL-family hosts manage this
/// natively and never include it.
pub const DEFAULT_JAVA_SYMLINK_POLICY: &str = "default-java-symlink";

/// License-acceptance marker left behind by vendor distributions.
///
/// Policy for vendors without a license flow: never create the marker, but
/// remove it if a prior state left it behind. The asymmetry is intentional.
pub const LICENSE_MARKER_PATH: &str = "/opt/local/.dlj_license_accepted";

/// Compute the minimal ordered action list converging `observed` toward
/// `desired`.
///
/// Order within the plan is significant:
/// 1. `InstallPackage` for every desired package not yet installed
/// 2. A single coalesced `EmitNotification` when installs were planned and
///    alternatives are managed (once per run, not once per package)
/// 3. `SetAlternative` when the selected alternative differs
/// 4. `DeleteFile` for a stale license marker
/// 5. Sub-policy inclusions not yet applied
pub fn plan(desired: &DesiredState, observed: &ObservedState) -> Vec<Action> {
    let mut actions = Vec::new();

    for package in desired.all_packages() {
        if !observed.installed_packages.contains(package) {
            actions.push(Action::InstallPackage(package.clone()));
        }
    }

    let installed_any = !actions.is_empty();
    if installed_any && desired.set_alternatives {
        actions.push(Action::EmitNotification(VERSION_CHANGED_EVENT.to_string()));
    }

    if desired.set_alternatives
        && let Some(alternative) = &desired.alternative
        && observed.current_alternative.as_deref() != Some(alternative)
    {
        actions.push(Action::SetAlternative(alternative.clone()));
    }

    let marker = PathBuf::from(LICENSE_MARKER_PATH);
    if !desired.license_file_required && observed.existing_files.contains(&marker) {
        actions.push(Action::DeleteFile(marker));
    }

    // Override wins over derivation: both fields set means the sub-policy
    // is skipped regardless of whether derived values would differ.
    if !desired.overrides_complete()
        && !observed.applied_policies.contains(DERIVE_ATTRIBUTES_POLICY)
    {
        actions.push(Action::IncludePolicy(DERIVE_ATTRIBUTES_POLICY.to_string()));
    }

    if desired.supports_default_symlink
        && !observed
            .applied_policies
            .contains(DEFAULT_JAVA_SYMLINK_POLICY)
    {
        actions.push(Action::IncludePolicy(
            DEFAULT_JAVA_SYMLINK_POLICY.to_string(),
        ));
    }

    actions
}
