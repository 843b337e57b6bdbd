//! Policy table - immutable mapping from policy key to desired state.
//!
//! The table is populated once at process start from static configuration
//! and never mutated afterwards, so parallel convergence runs can share a
//! reference without locking.

use crate::error::Error;
use crate::types::{DesiredState, PolicyKey};
use std::collections::BTreeMap;

/// Process-wide desired-state configuration, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    entries: BTreeMap<PolicyKey, DesiredState>,
}

impl PolicyTable {
    /// Build a table from `(key, desired)` pairs.
    ///
    /// Later duplicates of a key replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PolicyKey, DesiredState)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up the desired state for a resolved key.
    ///
    /// Fails with [`Error::PolicyNotFound`] when the key is absent.
    pub fn lookup(&self, key: &PolicyKey) -> Result<DesiredState, Error> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::PolicyNotFound(key.as_str().to_string()))
    }

    /// Whether the table has an entry for `key`.
    pub fn contains(&self, key: &PolicyKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PolicyKey, &DesiredState)> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
