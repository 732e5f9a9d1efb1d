//! Incremental graph maintenance
//!
//! Sweeps the tree for current fingerprints, partitions against the
//! persisted map, re-indexes only added and modified files, and merges the
//! result. Dependency edges and summary counters are fully re-derived by
//! the merge; unchanged files keep their prior entries.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use arbor_core::{
    detect_changes, fingerprint, merge_update, now_utc, ChangeSet, FileEntry, Graph, Language,
};

use crate::indexer::index_file;
use crate::parsers::ParserPool;
use crate::vcs;
use crate::walk::{collect_files, effective_language, has_cpp_sources, rel_posix};

/// Bring `graph` up to date with the on-disk tree. `previous` is the
/// fingerprint map persisted by the last build. Returns the change
/// partition; when it is empty the graph is left untouched.
pub fn update_graph(
    graph: &mut Graph,
    previous: &BTreeMap<String, String>,
    root: &Path,
    exclude: &[String],
) -> Result<ChangeSet> {
    let files = collect_files(root, exclude)?;
    let has_cpp = has_cpp_sources(&files);

    // fingerprint sweep over the current tree; contents are kept so changed
    // files are read exactly once
    let mut current: BTreeMap<String, String> = BTreeMap::new();
    let mut contents: HashMap<String, (Language, Vec<u8>)> = HashMap::new();
    for path in &files {
        let Some(base) = Language::from_path(path) else {
            continue;
        };
        let language = effective_language(path, base, has_cpp);
        let rel = rel_posix(path, root);
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping unreadable file {rel}: {e}");
                continue;
            }
        };
        current.insert(rel.clone(), fingerprint(&content));
        contents.insert(rel, (language, content));
    }

    let changes = detect_changes(previous, &current);
    if changes.is_empty() {
        tracing::debug!("no changes detected");
        return Ok(changes);
    }

    tracing::info!(
        "changes: +{} added, ~{} modified, -{} removed",
        changes.added.len(),
        changes.modified.len(),
        changes.removed.len()
    );

    let languages: BTreeSet<Language> = changes
        .added
        .iter()
        .chain(&changes.modified)
        .filter_map(|rel| contents.get(rel).map(|(language, _)| *language))
        .collect();
    let mut pool =
        ParserPool::for_languages(languages).context("parser setup failed, aborting update")?;

    let mut updated: BTreeMap<String, FileEntry> = BTreeMap::new();
    for rel in changes.added.iter().chain(&changes.modified) {
        let Some((language, content)) = contents.get(rel) else {
            continue;
        };
        match index_file(&mut pool, *language, rel, content) {
            Ok(entry) => {
                updated.insert(rel.clone(), entry);
            }
            Err(e) => {
                tracing::warn!("skipping {rel}: {e}");
                continue;
            }
        }
    }

    merge_update(graph, updated, &changes.removed);
    graph.revision = vcs::head_revision(root);
    graph.built_at = now_utc();

    Ok(changes)
}
