//! Cross-module dependency derivation
//!
//! The single routine that turns file-level import data into module-level
//! `depends_on`/`depended_by` edges. Both the full-scan builder and the
//! incremental merge call [`rebuild_dependencies`]; edges are never patched
//! incrementally, so they cannot drift from file-level truth.

use std::collections::{HashMap, HashSet};

use crate::model::Graph;
use crate::paths::{posix_dirname, posix_normalize, strip_extension};

/// Map every file path, with and without its extension, to its module name.
/// The extensionless entries support extension-less imports; the first file
/// (in lexicographic order) wins when two files share a stem.
fn module_lookup(graph: &Graph) -> HashMap<String, String> {
    let mut lookup: HashMap<String, String> = HashMap::new();
    for (path, entry) in &graph.files {
        lookup.insert(path.clone(), entry.module.clone());
        lookup
            .entry(strip_extension(path))
            .or_insert_with(|| entry.module.clone());
    }
    lookup
}

/// Resolve one in-project import to the module owning the target file.
/// The source is joined against the importer's directory and normalized;
/// a `/index` suffix covers directory-as-module imports.
pub fn resolve_import(
    importer_path: &str,
    source: &str,
    lookup: &HashMap<String, String>,
) -> Option<String> {
    let importer_dir = posix_dirname(importer_path);
    let resolved = posix_normalize(&format!("{importer_dir}/{source}"));

    lookup
        .get(&resolved)
        .or_else(|| lookup.get(&format!("{resolved}/index")))
        .cloned()
}

/// Recompute every module's `depends_on`/`depended_by` from the current
/// `files` map. Output lists are sorted and deduplicated; a module never
/// lists itself.
pub fn rebuild_dependencies(graph: &mut Graph) {
    let lookup = module_lookup(graph);

    let mut depends_on: HashMap<String, HashSet<String>> = HashMap::new();
    let mut depended_by: HashMap<String, HashSet<String>> = HashMap::new();
    for name in graph.modules.keys() {
        depends_on.insert(name.clone(), HashSet::new());
        depended_by.insert(name.clone(), HashSet::new());
    }

    for (path, entry) in &graph.files {
        for import in &entry.imports {
            if import.is_external {
                continue;
            }
            let Some(target) = resolve_import(path, &import.source, &lookup) else {
                continue;
            };
            if target == entry.module {
                continue;
            }
            if let Some(set) = depends_on.get_mut(&entry.module) {
                set.insert(target.clone());
            }
            if let Some(set) = depended_by.get_mut(&target) {
                set.insert(entry.module.clone());
            }
        }
    }

    for (name, module) in &mut graph.modules {
        let mut dep_on: Vec<String> = depends_on
            .remove(name)
            .map(|s| s.into_iter().collect())
            .unwrap_or_default();
        dep_on.sort();
        module.depends_on = dep_on;

        let mut dep_by: Vec<String> = depended_by
            .remove(name)
            .map(|s| s.into_iter().collect())
            .unwrap_or_default();
        dep_by.sort();
        module.depended_by = dep_by;
    }
}
