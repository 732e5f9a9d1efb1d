//! Change detection and incremental graph maintenance

use std::collections::BTreeMap;

use crate::model::{FileEntry, Graph};
use crate::resolve::rebuild_dependencies;

/// Partition of the union of two fingerprint sets. Every path lands in
/// exactly one bucket; all four are lexicographically sorted.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: Vec<String>,
}

impl ChangeSet {
    /// True when nothing needs re-indexing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// Compare the persisted fingerprint map against a freshly computed one.
pub fn detect_changes(
    previous: &BTreeMap<String, String>,
    current: &BTreeMap<String, String>,
) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, new_fingerprint) in current {
        match previous.get(path) {
            None => changes.added.push(path.clone()),
            Some(old) if old != new_fingerprint => changes.modified.push(path.clone()),
            Some(_) => changes.unchanged.push(path.clone()),
        }
    }

    for path in previous.keys() {
        if !current.contains_key(path) {
            changes.removed.push(path.clone());
        }
    }

    changes
}

/// Merge re-indexed files into an existing graph: drop removed entries,
/// insert or replace updated ones (handling module moves), then rebuild the
/// summary and every dependency edge from scratch. Unchanged files keep
/// their prior entries untouched.
pub fn merge_update(
    graph: &mut Graph,
    updated: BTreeMap<String, FileEntry>,
    removed: &[String],
) {
    for path in removed {
        graph.detach_file(path);
    }

    for (path, entry) in updated {
        graph.attach_file(path, entry);
    }

    graph.recompute_summary();
    rebuild_dependencies(graph);
}
