//! Platform resolution - maps a host to a policy key.
//!
//! Matching is deliberately narrow: an exact `(family, version)` entry
//! takes precedence, then the `(family, major)` bucket, then failure.
//! There is no wildcard matching beyond version bucketing.

use crate::error::Error;
use crate::policy::PolicyTable;
use crate::types::{DesiredState, Host, PolicyKey};

/// Resolve a host to the policy key that governs it.
///
/// Fails with [`Error::UnknownPlatform`] when neither the exact release
/// nor the major-version bucket has a table entry.
pub fn resolve(host: &Host, table: &PolicyTable) -> Result<PolicyKey, Error> {
    let exact = PolicyKey::exact(&host.family, &host.version);
    if table.contains(&exact) {
        return Ok(exact);
    }

    let bucket = PolicyKey::bucket(&host.family, host.major_version());
    if table.contains(&bucket) {
        return Ok(bucket);
    }

    Err(Error::UnknownPlatform {
        family: host.family.clone(),
        version: host.version.clone(),
    })
}

/// Resolve a host and look up its desired state in one step.
pub fn resolve_desired(host: &Host, table: &PolicyTable) -> Result<DesiredState, Error> {
    let key = resolve(host, table)?;
    table.lookup(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DesiredState;

    fn table() -> PolicyTable {
        PolicyTable::from_entries([
            (
                PolicyKey::bucket("debian", "9"),
                DesiredState::new(["openjdk-8-jdk"], None),
            ),
            (
                PolicyKey::exact("centos", "7.4.1708"),
                DesiredState::new(["java-1.8.0-openjdk"], None),
            ),
            (
                PolicyKey::bucket("centos", "7"),
                DesiredState::new(["java-1.8.0-openjdk-headless"], None),
            ),
        ])
    }

    #[test]
    fn bucket_match() {
        let key = resolve(&Host::new("debian", "9.1"), &table()).unwrap();
        assert_eq!(key.as_str(), "debian-9");
    }

    #[test]
    fn exact_match_takes_precedence_over_bucket() {
        let key = resolve(&Host::new("centos", "7.4.1708"), &table()).unwrap();
        assert_eq!(key.as_str(), "centos-7.4.1708");
    }

    #[test]
    fn bucket_fallback_for_other_releases() {
        let key = resolve(&Host::new("centos", "7.9"), &table()).unwrap();
        assert_eq!(key.as_str(), "centos-7");
    }

    #[test]
    fn unknown_family_fails() {
        let err = resolve(&Host::new("windows", "10"), &table()).unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform { .. }));
        assert!(err.is_planning_failure());
    }

    #[test]
    fn unknown_major_version_fails() {
        let err = resolve(&Host::new("debian", "4.0"), &table()).unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform { .. }));
    }

    #[test]
    fn resolve_desired_chains_lookup() {
        let desired = resolve_desired(&Host::new("debian", "9.1"), &table()).unwrap();
        assert_eq!(desired.packages, ["openjdk-8-jdk"]);
    }
}
