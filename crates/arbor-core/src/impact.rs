//! Impact analysis: bounded traversal of reverse dependency edges

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::model::{Graph, Module};

/// What the query target resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Module,
    File,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Module => "module",
            TargetKind::File => "file",
        }
    }
}

/// Blast radius of changing one module or file.
#[derive(Debug, Clone)]
pub struct ImpactResult {
    pub target_kind: TargetKind,
    pub target_module: String,
    pub direct_dependants: Vec<String>,
    pub transitive_dependants: Vec<String>,
    pub impacted_modules: Vec<String>,
    pub impacted_files: Vec<String>,
}

/// Compute the transitive blast radius of `target`, which may name a module
/// or a file (exact path, or substring as a fallback). `max_depth` bounds
/// the breadth-first expansion; zero means direct-result only, with no
/// traversal. Unknown targets yield an empty, well-formed result.
pub fn analyze_impact(graph: &Graph, target: &str, max_depth: u32) -> ImpactResult {
    let (target_kind, target_module) = resolve_target(graph, target);

    let direct_dependants = graph
        .module(&target_module)
        .map(|m| m.depended_by.clone())
        .unwrap_or_default();

    let transitive_dependants = collect_dependants(&graph.modules, &target_module, max_depth);

    let mut impacted_modules = vec![target_module.clone()];
    impacted_modules.extend(transitive_dependants.iter().cloned());

    let mut impacted_files: Vec<String> = impacted_modules
        .iter()
        .filter_map(|m| graph.modules.get(m))
        .flat_map(|m| m.files.iter().cloned())
        .collect();
    impacted_files.sort();

    ImpactResult {
        target_kind,
        target_module,
        direct_dependants,
        transitive_dependants,
        impacted_modules,
        impacted_files,
    }
}

/// Module names win over file paths; exact file paths win over substring
/// matches. Substring fallback takes the lexicographically first matching
/// path, which can pick an unintended file for short targets.
fn resolve_target(graph: &Graph, target: &str) -> (TargetKind, String) {
    if graph.modules.contains_key(target) {
        return (TargetKind::Module, target.to_string());
    }

    if let Some(entry) = graph.files.get(target) {
        return (TargetKind::File, entry.module.clone());
    }

    if let Some(path) = graph.files.keys().find(|f| f.contains(target)) {
        return (TargetKind::File, graph.files[path].module.clone());
    }

    (TargetKind::Module, target.to_string())
}

/// Breadth-first walk along `depended_by` edges, frontier by frontier, each
/// module visited at most once. Returns the visited set minus the start,
/// sorted by name.
fn collect_dependants(
    modules: &BTreeMap<String, Module>,
    start: &str,
    max_depth: u32,
) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start.to_string());

    let mut result: Vec<String> = Vec::new();
    let mut queue: VecDeque<(String, u32)> = VecDeque::new();
    queue.push_back((start.to_string(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        let Some(module) = modules.get(&current) else {
            continue;
        };
        for dependant in &module.depended_by {
            if visited.insert(dependant.clone()) {
                result.push(dependant.clone());
                queue.push_back((dependant.clone(), depth + 1));
            }
        }
    }

    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileEntry, Language};

    fn entry(module: &str) -> FileEntry {
        FileEntry {
            language: Language::Rust,
            module: module.to_string(),
            fingerprint: "sha256:0011223344556677".to_string(),
            lines: 5,
            functions: vec![],
            classes: vec![],
            types: vec![],
            imports: vec![],
            exports: vec![],
            is_entry_point: false,
        }
    }

    /// core <- utils <- app, core <- app
    fn diamond() -> Graph {
        let mut g = Graph::new("test", "/tmp/test");
        g.attach_file("src/core/mod.rs".to_string(), entry("core"));
        g.attach_file("src/utils/mod.rs".to_string(), entry("utils"));
        g.attach_file("src/app/main.rs".to_string(), entry("app"));

        g.modules.get_mut("core").unwrap().depended_by =
            vec!["app".to_string(), "utils".to_string()];
        g.modules.get_mut("utils").unwrap().depends_on = vec!["core".to_string()];
        g.modules.get_mut("utils").unwrap().depended_by = vec!["app".to_string()];
        g.modules.get_mut("app").unwrap().depends_on =
            vec!["core".to_string(), "utils".to_string()];
        g
    }

    /// a <- b <- c <- d, one edge per hop
    fn chain() -> Graph {
        let mut g = Graph::new("chain", "/tmp/chain");
        for name in ["a", "b", "c", "d"] {
            g.attach_file(format!("src/{name}/mod.rs"), entry(name));
        }
        g.modules.get_mut("a").unwrap().depended_by = vec!["b".to_string()];
        g.modules.get_mut("b").unwrap().depended_by = vec!["c".to_string()];
        g.modules.get_mut("c").unwrap().depended_by = vec!["d".to_string()];
        g
    }

    #[test]
    fn module_target() {
        let result = analyze_impact(&diamond(), "core", 3);
        assert_eq!(result.target_kind, TargetKind::Module);
        assert_eq!(result.target_module, "core");
        assert_eq!(result.direct_dependants, vec!["app", "utils"]);
        assert_eq!(result.transitive_dependants, vec!["app", "utils"]);
        assert!(result.impacted_modules.contains(&"core".to_string()));
    }

    #[test]
    fn leaf_module_has_no_dependants() {
        let result = analyze_impact(&diamond(), "app", 3);
        assert!(result.direct_dependants.is_empty());
        assert!(result.transitive_dependants.is_empty());
        assert_eq!(result.impacted_modules, vec!["app"]);
        assert_eq!(result.impacted_files, vec!["src/app/main.rs"]);
    }

    #[test]
    fn exact_file_target() {
        let result = analyze_impact(&diamond(), "src/core/mod.rs", 3);
        assert_eq!(result.target_kind, TargetKind::File);
        assert_eq!(result.target_module, "core");
    }

    #[test]
    fn substring_file_target() {
        let result = analyze_impact(&diamond(), "core/mod", 3);
        assert_eq!(result.target_kind, TargetKind::File);
        assert_eq!(result.target_module, "core");
    }

    #[test]
    fn unknown_target_is_empty_but_well_formed() {
        let result = analyze_impact(&diamond(), "nonexistent", 3);
        assert_eq!(result.target_module, "nonexistent");
        assert!(result.direct_dependants.is_empty());
        assert!(result.transitive_dependants.is_empty());
        assert!(result.impacted_files.is_empty());
    }

    #[test]
    fn depth_zero_performs_no_expansion() {
        let result = analyze_impact(&chain(), "a", 0);
        assert!(result.transitive_dependants.is_empty());
        // direct dependants still reported from the edge set itself
        assert_eq!(result.direct_dependants, vec!["b"]);
    }

    #[test]
    fn depth_bounds_frontier_expansion() {
        let g = chain();
        assert_eq!(analyze_impact(&g, "a", 1).transitive_dependants, vec!["b"]);
        assert_eq!(
            analyze_impact(&g, "a", 2).transitive_dependants,
            vec!["b", "c"]
        );
        assert_eq!(
            analyze_impact(&g, "a", 3).transitive_dependants,
            vec!["b", "c", "d"]
        );
    }

    #[test]
    fn cycle_terminates() {
        let mut g = diamond();
        // close a loop: core also depends by app's edge back
        g.modules.get_mut("app").unwrap().depended_by = vec!["core".to_string()];
        let result = analyze_impact(&g, "core", 10);
        assert_eq!(result.transitive_dependants, vec!["app", "utils"]);
    }

    #[test]
    fn impacted_files_are_sorted() {
        let result = analyze_impact(&diamond(), "core", 3);
        let mut sorted = result.impacted_files.clone();
        sorted.sort();
        assert_eq!(result.impacted_files, sorted);
    }
}
