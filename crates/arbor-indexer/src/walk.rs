//! Candidate-file discovery
//!
//! Walks the project tree honoring `.gitignore`, drops conventional
//! build/dependency directories plus user-supplied glob patterns, keeps
//! only files with a supported language, and returns them sorted so every
//! later stage sees a canonical order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arbor_core::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

const DEFAULT_EXCLUDE: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "vendor",
    "__pycache__",
    "target",
    ".arbor",
];

/// Collect the sorted list of indexable files under `root`.
pub fn collect_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = build_globset(exclude)?;
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path().to_path_buf();
        if !path.is_file() {
            continue;
        }
        if is_excluded(&path, root, &patterns) {
            continue;
        }
        if Language::from_path(&path).is_some() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Project-relative posix path for a file under `root`.
pub fn rel_posix(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// True when any C++ source or header extension appears in the candidate
/// list. Used to reclassify `.h` files for mixed projects.
pub fn has_cpp_sources(files: &[PathBuf]) -> bool {
    files.iter().any(|f| {
        f.extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "cpp" | "cc" | "cxx" | "hpp" | "hh"))
            .unwrap_or(false)
    })
}

/// `.h` files count as C++ when the project contains C++ sources.
pub fn effective_language(path: &Path, base: Language, project_has_cpp: bool) -> Language {
    if base == Language::C
        && project_has_cpp
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase() == "h")
            .unwrap_or(false)
    {
        Language::Cpp
    } else {
        base
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_excluded(path: &Path, root: &Path, patterns: &GlobSet) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };

    for component in rel.components() {
        let name = component.as_os_str().to_string_lossy();
        if DEFAULT_EXCLUDE.contains(&name.as_ref()) {
            return true;
        }
    }

    !patterns.is_empty() && patterns.is_match(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/auth")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("src/auth/login.ts"), "export function f() {}").unwrap();
        fs::write(dir.path().join("src/main.ts"), "").unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();

        let files = collect_files(dir.path(), &[]).unwrap();
        let rels: Vec<String> = files.iter().map(|f| rel_posix(f, dir.path())).collect();
        assert_eq!(rels, vec!["src/auth/login.ts", "src/main.ts"]);
    }

    #[test]
    fn user_patterns_exclude_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("src/a.ts"), "").unwrap();
        fs::write(dir.path().join("generated/b.ts"), "").unwrap();

        let files = collect_files(dir.path(), &["generated/**".to_string()]).unwrap();
        let rels: Vec<String> = files.iter().map(|f| rel_posix(f, dir.path())).collect();
        assert_eq!(rels, vec!["src/a.ts"]);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_files(dir.path(), &["[".to_string()]).is_err());
    }

    #[test]
    fn h_files_reclassify_in_cpp_projects() {
        let header = Path::new("engine.h");
        assert_eq!(
            effective_language(header, Language::C, false),
            Language::C
        );
        assert_eq!(
            effective_language(header, Language::C, true),
            Language::Cpp
        );
        // real C files keep their language either way
        assert_eq!(
            effective_language(Path::new("impl.c"), Language::C, true),
            Language::C
        );
    }

    #[test]
    fn detects_cpp_sources() {
        let with = vec![PathBuf::from("a.ts"), PathBuf::from("b.cpp")];
        assert!(has_cpp_sources(&with));
        let without = vec![PathBuf::from("a.c"), PathBuf::from("b.h")];
        assert!(!has_cpp_sources(&without));
    }
}
