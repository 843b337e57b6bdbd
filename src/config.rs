//! Policy table and state-snapshot loading.
//!
//! The table is read once at startup and stays immutable for the life of
//! the process. Sources, in order: an explicit `--config` path, the user's
//! `~/.config/jconverge/policies.toml`, then the built-in OpenJDK 8 table.
//! TOML and JSON are both accepted, selected by file extension.

use anyhow::{Context, Result};
use convergence::{DesiredState, ObservedState, PolicyKey, PolicyTable};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the user policy file.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("jconverge").join("policies.toml"))
}

/// On-disk policy file: a list of `[[policy]]` entries.
#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    policy: Vec<PolicyEntry>,
}

/// One table entry keyed by `(family, version-or-bucket)`.
#[derive(Debug, Deserialize)]
struct PolicyEntry {
    family: String,
    /// Exact release ("7.4.1708") or major bucket ("7")
    version: String,
    packages: Vec<String>,
    #[serde(default = "default_true")]
    set_alternatives: bool,
    #[serde(default)]
    alternative: Option<String>,
    #[serde(default)]
    supports_default_symlink: bool,
    #[serde(default)]
    license_file_required: bool,
}

fn default_true() -> bool {
    true
}

impl PolicyEntry {
    fn into_pair(self) -> (PolicyKey, DesiredState) {
        let key = PolicyKey::exact(&self.family, &self.version);
        let desired = DesiredState {
            packages: self.packages,
            set_alternatives: self.set_alternatives,
            alternative: self.alternative,
            java_home: None,
            extra_packages: None,
            supports_default_symlink: self.supports_default_symlink,
            license_file_required: self.license_file_required,
        };
        (key, desired)
    }
}

/// Load the policy table.
///
/// An explicit path must exist; the default path is optional and falls
/// through to the built-in table when absent.
pub fn load_table(explicit: Option<&Path>) -> Result<PolicyTable> {
    if let Some(path) = explicit {
        return load_table_file(path);
    }

    let default = default_config_path()?;
    if default.exists() {
        return load_table_file(&default);
    }

    log::debug!("no policy file found, using built-in table");
    Ok(builtin_table())
}

fn load_table_file(path: &Path) -> Result<PolicyTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read policy file: {}", path.display()))?;

    let file: PolicyFile = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))?
    };

    log::debug!(
        "loaded {} policy entries from {}",
        file.policy.len(),
        path.display()
    );
    Ok(PolicyTable::from_entries(
        file.policy.into_iter().map(PolicyEntry::into_pair),
    ))
}

/// Built-in OpenJDK 8 table covering the supported platform matrix.
pub fn builtin_table() -> PolicyTable {
    let debian = || {
        DesiredState::new(
            ["openjdk-8-jdk", "openjdk-8-jre-headless"],
            Some("java-1.8.0-openjdk-amd64"),
        )
        .with_default_symlink()
    };
    let rhel = || {
        DesiredState::new(
            ["java-1.8.0-openjdk", "java-1.8.0-openjdk-devel"],
            Some("java-1.8.0-openjdk.x86_64"),
        )
    };

    PolicyTable::from_entries([
        (PolicyKey::bucket("debian", "8"), debian()),
        (PolicyKey::bucket("debian", "9"), debian()),
        (PolicyKey::bucket("ubuntu", "16"), debian()),
        (PolicyKey::bucket("centos", "6"), rhel()),
        (PolicyKey::bucket("centos", "7"), rhel()),
    ])
}

/// Load an observed-state snapshot (TOML or JSON by extension).
pub fn load_observed(path: Option<&Path>) -> Result<ObservedState> {
    let Some(path) = path else {
        return Ok(ObservedState::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read state file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
    }
}
