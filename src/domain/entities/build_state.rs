//! Incremental build state
//!
//! One fingerprint per source group. A group is skipped when its fingerprint
//! matches and every expected output is still on disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentHash;

/// Current on-disk format version
pub const STATE_VERSION: u32 = 1;

/// Recorded result of compiling one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFingerprint {
    pub hash: String,
    /// Outputs relative to the build dir
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// Per-group fingerprints persisted between builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub version: u32,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupFingerprint>,
}

impl Default for BuildState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            groups: BTreeMap::new(),
        }
    }
}

impl BuildState {
    pub fn fingerprint(&self, group: &str) -> Option<&GroupFingerprint> {
        self.groups.get(group)
    }

    pub fn is_fresh(&self, group: &str, hash: &ContentHash) -> bool {
        self.groups
            .get(group)
            .is_some_and(|f| f.hash == hash.as_str())
    }

    pub fn record(&mut self, group: impl Into<String>, hash: &ContentHash, outputs: Vec<String>) {
        self.groups.insert(
            group.into(),
            GroupFingerprint {
                hash: hash.to_string(),
                outputs,
            },
        );
    }

    pub fn forget(&mut self, group: &str) {
        self.groups.remove(group);
    }

    /// Drop groups no longer declared.
    pub fn retain_groups<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let keep: Vec<&str> = names.into_iter().collect();
        self.groups.retain(|name, _| keep.contains(&name.as_str()));
    }
}
