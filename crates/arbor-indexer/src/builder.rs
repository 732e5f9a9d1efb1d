//! Full-scan graph construction

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use arbor_core::{now_utc, rebuild_dependencies, Graph, Language};

use crate::indexer::index_file;
use crate::parsers::ParserPool;
use crate::vcs;
use crate::walk::{collect_files, effective_language, has_cpp_sources, rel_posix};

/// Build a complete graph for the project at `root`.
///
/// A grammar that cannot be loaded for a language the project contains is
/// fatal and nothing is returned; unreadable or unparseable files are
/// logged, skipped, and the scan continues.
pub fn scan_project(root: &Path, exclude: &[String]) -> Result<Graph> {
    let project_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let root_str = root.to_string_lossy().replace('\\', "/");
    let mut graph = Graph::new(project_name, &root_str);
    graph.revision = vcs::head_revision(root);

    let files = collect_files(root, exclude)?;
    let has_cpp = has_cpp_sources(&files);

    let languages: BTreeSet<Language> = files
        .iter()
        .filter_map(|path| {
            Language::from_path(path).map(|base| effective_language(path, base, has_cpp))
        })
        .collect();
    let mut pool =
        ParserPool::for_languages(languages).context("parser setup failed, aborting scan")?;

    tracing::info!("scanning {} candidate files", files.len());

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

        match index_file(&mut pool, language, &rel, &content) {
            Ok(entry) => graph.attach_file(rel, entry),
            Err(e) => {
                tracing::warn!("skipping {rel}: {e}");
                continue;
            }
        }
    }

    graph.config.exclude_patterns = exclude.to_vec();
    graph.recompute_summary();
    rebuild_dependencies(&mut graph);
    graph.built_at = now_utc();

    tracing::info!(
        "indexed {} files across {} modules",
        graph.summary.total_files,
        graph.summary.modules.len()
    );

    Ok(graph)
}
