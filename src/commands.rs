//! CLI command implementations

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use arbor_core::{analyze_impact, store};
use arbor_indexer::{scan_project, update_graph};

pub fn scan(root: &Path, exclude: &[String]) -> anyhow::Result<()> {
    println!("Scanning {}...", root.display());

    let started = Instant::now();
    let graph = scan_project(root, exclude)?;
    let duration_ms = started.elapsed().as_millis() as u64;
    store::save(root, &graph, duration_ms)?;

    println!("Scan complete.");
    println!("  Files:     {}", graph.summary.total_files);
    println!("  Functions: {}", graph.summary.total_functions);
    println!("  Classes:   {}", graph.summary.total_classes);
    println!("  Modules:   {}", graph.summary.modules.join(", "));
    println!("  Output:    {}", store::out_dir(root).display());
    Ok(())
}

pub fn update(root: &Path, exclude: &[String]) -> anyhow::Result<()> {
    let mut graph = store::load_graph(root)?;

    // fingerprint map from the last build; fall back to the graph's own
    // entries when the metadata document predates the map
    let previous: BTreeMap<String, String> = match store::load_meta(root) {
        Ok(meta) if !meta.fingerprints.is_empty() => meta.fingerprints,
        _ => graph
            .files
            .iter()
            .map(|(path, entry)| (path.clone(), entry.fingerprint.clone()))
            .collect(),
    };

    let started = Instant::now();
    let changes = update_graph(&mut graph, &previous, root, exclude)?;

    if changes.is_empty() {
        println!("No changes detected.");
        return Ok(());
    }

    let duration_ms = started.elapsed().as_millis() as u64;
    store::save(root, &graph, duration_ms)?;

    println!("Update complete.");
    println!(
        "  +{} ~{} -{}",
        changes.added.len(),
        changes.modified.len(),
        changes.removed.len()
    );
    if !changes.added.is_empty() {
        println!("  Added: {}", changes.added.join(", "));
    }
    if !changes.modified.is_empty() {
        println!("  Modified: {}", changes.modified.join(", "));
    }
    if !changes.removed.is_empty() {
        println!("  Removed: {}", changes.removed.join(", "));
    }
    Ok(())
}

pub fn impact(root: &Path, target: &str, depth: u32) -> anyhow::Result<()> {
    let graph = store::load_graph(root)?;
    let result = analyze_impact(&graph, target, depth);

    println!("Impact analysis for: {target}");
    println!("  Target type: {}", result.target_kind.as_str());
    println!("  Target module: {}", result.target_module);
    println!("  Direct dependants: {}", join_or_none(&result.direct_dependants));
    println!(
        "  Transitive dependants: {}",
        join_or_none(&result.transitive_dependants)
    );
    println!(
        "  Impacted modules ({}): {}",
        result.impacted_modules.len(),
        result.impacted_modules.join(", ")
    );
    println!("  Impacted files ({}):", result.impacted_files.len());
    for file in &result.impacted_files {
        println!("    - {file}");
    }
    Ok(())
}

pub fn status(root: &Path) -> anyhow::Result<()> {
    let graph = store::load_graph(root)?;
    let meta = store::load_meta(root).ok();

    println!("Project: {}", graph.project.name);
    println!("Built at: {}", graph.built_at);
    println!("Revision: {}", graph.revision.as_deref().unwrap_or("(none)"));
    println!("Files: {}", graph.summary.total_files);
    println!("Functions: {}", graph.summary.total_functions);
    println!("Classes: {}", graph.summary.total_classes);
    println!("Modules: {}", graph.summary.modules.join(", "));

    if !graph.summary.languages.is_empty() {
        let langs: Vec<String> = graph
            .summary
            .languages
            .iter()
            .map(|(lang, count)| format!("{lang}({count})"))
            .collect();
        println!("Languages: {}", langs.join(", "));
    }

    if let Some(meta) = meta {
        println!("Last update: {}", meta.last_build_at);
        println!("Build duration: {}ms", meta.build_duration_ms);
        println!("Tracked files: {}", meta.fingerprints.len());
    }
    Ok(())
}

pub fn clear(root: &Path) -> anyhow::Result<()> {
    store::clear(root)?;
    println!("Removed {}", store::out_dir(root).display());
    Ok(())
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
