//! Persistence of the graph and metadata documents
//!
//! One directory per indexed project: `.arbor/` at the project root, holding
//! `graph.json` and `meta.json`. Both documents serialize with stable key
//! order so diffs of the artifacts stay meaningful.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{now_utc, BuildMeta, Graph};

/// Artifact directory, relative to the project root.
pub const OUT_DIR: &str = ".arbor";

pub const GRAPH_FILE: &str = "graph.json";
pub const META_FILE: &str = "meta.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no code graph found under {0}; run a full scan first")]
    Missing(PathBuf),
    #[error("failed to read graph artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed graph artifact: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Artifact directory for a project root.
pub fn out_dir(root: &Path) -> PathBuf {
    root.join(OUT_DIR)
}

/// Persist both documents. The metadata fingerprint map is rebuilt here from
/// the graph's current `files`, one entry per file, so the differ's next run
/// always sees exactly what was saved.
pub fn save(root: &Path, graph: &Graph, build_duration_ms: u64) -> Result<(), StoreError> {
    let dir = out_dir(root);
    std::fs::create_dir_all(&dir)?;

    let graph_json = serde_json::to_string_pretty(graph)?;
    std::fs::write(dir.join(GRAPH_FILE), graph_json)?;

    let fingerprints: BTreeMap<String, String> = graph
        .files
        .iter()
        .map(|(path, entry)| (path.clone(), entry.fingerprint.clone()))
        .collect();
    let meta = BuildMeta {
        last_build_at: now_utc(),
        revision: graph.revision.clone(),
        build_duration_ms,
        fingerprints,
    };
    let meta_json = serde_json::to_string_pretty(&meta)?;
    std::fs::write(dir.join(META_FILE), meta_json)?;

    tracing::debug!("graph artifacts saved to {}", dir.display());
    Ok(())
}

pub fn load_graph(root: &Path) -> Result<Graph, StoreError> {
    let path = out_dir(root).join(GRAPH_FILE);
    if !path.exists() {
        return Err(StoreError::Missing(out_dir(root)));
    }
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn load_meta(root: &Path) -> Result<BuildMeta, StoreError> {
    let path = out_dir(root).join(META_FILE);
    if !path.exists() {
        return Err(StoreError::Missing(out_dir(root)));
    }
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Remove the artifact directory.
pub fn clear(root: &Path) -> std::io::Result<()> {
    let dir = out_dir(root);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileEntry, Language};

    fn entry(module: &str, fingerprint: &str) -> FileEntry {
        FileEntry {
            language: Language::Python,
            module: module.to_string(),
            fingerprint: fingerprint.to_string(),
            lines: 3,
            functions: vec![],
            classes: vec![],
            types: vec![],
            imports: vec![],
            exports: vec![],
            is_entry_point: false,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = Graph::new("proj", "/tmp/proj");
        graph.attach_file("src/app/main.py".to_string(), entry("app", "sha256:0123456789abcdef"));
        graph.recompute_summary();

        save(dir.path(), &graph, 42).unwrap();
        let loaded = load_graph(dir.path()).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn meta_mirrors_graph_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = Graph::new("proj", "/tmp/proj");
        graph.attach_file("a.py".to_string(), entry("_root", "sha256:aaaaaaaaaaaaaaaa"));
        graph.attach_file("b.py".to_string(), entry("_root", "sha256:bbbbbbbbbbbbbbbb"));

        save(dir.path(), &graph, 0).unwrap();
        let meta = load_meta(dir.path()).unwrap();
        assert_eq!(meta.fingerprints.len(), 2);
        assert_eq!(meta.fingerprints["a.py"], "sha256:aaaaaaaaaaaaaaaa");
        assert_eq!(meta.build_duration_ms, 0);
    }

    #[test]
    fn missing_artifacts_are_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        match load_graph(dir.path()) {
            Err(StoreError::Missing(path)) => assert!(path.ends_with(OUT_DIR)),
            other => panic!("expected Missing, got {other:?}"),
        }
        assert!(matches!(load_meta(dir.path()), Err(StoreError::Missing(_))));
    }

    #[test]
    fn clear_removes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let graph = Graph::new("proj", "/tmp/proj");
        save(dir.path(), &graph, 0).unwrap();
        assert!(out_dir(dir.path()).exists());

        clear(dir.path()).unwrap();
        assert!(!out_dir(dir.path()).exists());
        // clearing twice is fine
        clear(dir.path()).unwrap();
    }

    #[test]
    fn serialized_graph_is_deterministic() {
        let mut graph = Graph::new("proj", "/tmp/proj");
        graph.attach_file("z.py".to_string(), entry("zeta", "sha256:cccccccccccccccc"));
        graph.attach_file("a.py".to_string(), entry("alpha", "sha256:dddddddddddddddd"));
        graph.recompute_summary();

        let first = serde_json::to_string_pretty(&graph).unwrap();
        let second = serde_json::to_string_pretty(&graph).unwrap();
        assert_eq!(first, second);
        // ordered maps: "a.py" must serialize before "z.py"
        assert!(first.find("a.py").unwrap() < first.find("z.py").unwrap());
    }
}
