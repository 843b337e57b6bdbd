//! Core types for convergence planning

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Platform identity of a host to converge
///
/// Constructed once per convergence run and treated as immutable. The
/// `family` is the OS family string ("debian", "ubuntu", "centos") and
/// `version` is the full release string ("9.1", "7.4.1708").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub family: String,
    pub version: String,
}

impl Host {
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }

    /// Major version bucket: everything before the first dot
    ///
    /// "9.1" → "9", "7.4.1708" → "7", "16.04" → "16".
    pub fn major_version(&self) -> &str {
        self.version.split('.').next().unwrap_or(&self.version)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

/// Identifier selecting a desired-state entry from the policy table
///
/// Keys come in two shapes: exact `"family-version"` entries and
/// `"family-major"` bucket entries. Resolution tries exact first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyKey(String);

impl PolicyKey {
    /// Exact key for a specific release: `"debian-9.1"`
    pub fn exact(family: &str, version: &str) -> Self {
        Self(format!("{family}-{version}"))
    }

    /// Bucket key for a major version: `"debian-9"`
    pub fn bucket(family: &str, major: &str) -> Self {
        Self(format!("{family}-{major}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Desired state for a resolved policy key
///
/// `java_home` and `extra_packages` are caller overrides layered on top of
/// the table entry. `None` means "not provided" - an explicit sentinel, so
/// an override of an empty list is still an override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Packages that must be installed
    pub packages: Vec<String>,

    /// Whether the OS alternatives entry should be managed
    #[serde(default = "default_true")]
    pub set_alternatives: bool,

    /// Alternatives target to select when `set_alternatives` is on
    #[serde(default)]
    pub alternative: Option<String>,

    /// Caller override: install root of the runtime
    #[serde(default)]
    pub java_home: Option<String>,

    /// Caller override: additional packages beyond the table entry
    #[serde(default)]
    pub extra_packages: Option<Vec<String>>,

    /// Whether the platform family supports a default-binary symlink
    /// convention (Debian family yes, RHEL family no). Static per family,
    /// never inferred from observed state.
    #[serde(default)]
    pub supports_default_symlink: bool,

    /// Whether this distribution requires a license-acceptance flow
    #[serde(default)]
    pub license_file_required: bool,
}

fn default_true() -> bool {
    true
}

impl DesiredState {
    /// Create a desired state managing `packages` with alternatives enabled
    pub fn new<I, S>(packages: I, alternative: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            set_alternatives: true,
            alternative: alternative.map(String::from),
            java_home: None,
            extra_packages: None,
            supports_default_symlink: false,
            license_file_required: false,
        }
    }

    /// Enable the default-binary symlink convention for this entry
    pub fn with_default_symlink(mut self) -> Self {
        self.supports_default_symlink = true;
        self
    }

    /// Layer caller overrides onto this state
    pub fn with_overrides(
        mut self,
        java_home: Option<String>,
        extra_packages: Option<Vec<String>>,
    ) -> Self {
        self.java_home = java_home;
        self.extra_packages = extra_packages;
        self
    }

    /// All packages to manage: the table entry plus any override extras
    pub fn all_packages(&self) -> impl Iterator<Item = &String> {
        self.packages
            .iter()
            .chain(self.extra_packages.iter().flatten())
    }

    /// Whether both override fields were explicitly provided
    ///
    /// When true, derived-attribute computation is suppressed entirely,
    /// regardless of whether the derived values would differ.
    pub fn overrides_complete(&self) -> bool {
        self.java_home.is_some() && self.extra_packages.is_some()
    }
}

/// Observed state of a host, supplied by an external probe
///
/// The planner treats this as read-only input; only an executor ever
/// produces an updated snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedState {
    /// Packages already installed
    #[serde(default)]
    pub installed_packages: BTreeSet<String>,

    /// Currently selected alternatives target, if any
    #[serde(default)]
    pub current_alternative: Option<String>,

    /// Files present on the host that the policy cares about
    #[serde(default)]
    pub existing_files: BTreeSet<PathBuf>,

    /// Sub-policies already included by a previous apply
    ///
    /// Tracked so that a fully converged host re-plans to an empty list.
    #[serde(default)]
    pub applied_policies: BTreeSet<String>,
}

/// A single step in a convergence plan
///
/// Actions are the only planner output; the planner never mutates state
/// itself. Ordering within a plan is significant and must be preserved by
/// the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum Action {
    /// Install a package via the platform package manager
    InstallPackage(String),
    /// Point the OS alternatives entry at the given target
    SetAlternative(String),
    /// Create a file marker
    WriteFile(PathBuf),
    /// Remove a file marker
    DeleteFile(PathBuf),
    /// Include a named sub-policy (recursively planned by the executor)
    IncludePolicy(String),
    /// Publish an event on the notification bus
    EmitNotification(String),
}

impl Action {
    /// Short category label, used for grouping in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InstallPackage(_) => "install_package",
            Self::SetAlternative(_) => "set_alternative",
            Self::WriteFile(_) => "write_file",
            Self::DeleteFile(_) => "delete_file",
            Self::IncludePolicy(_) => "include_policy",
            Self::EmitNotification(_) => "emit_notification",
        }
    }

    /// The action's target, as displayed to users
    pub fn target(&self) -> String {
        match self {
            Self::InstallPackage(name)
            | Self::SetAlternative(name)
            | Self::IncludePolicy(name)
            | Self::EmitNotification(name) => name.clone(),
            Self::WriteFile(path) | Self::DeleteFile(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())
    }
}
