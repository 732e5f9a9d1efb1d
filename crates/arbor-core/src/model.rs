//! Core data structures for the code graph

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Persisted graph schema version.
pub const SCHEMA_VERSION: &str = "1.0";

/// Supported languages for syntax-aware extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Go,
    Rust,
    Java,
    C,
    Cpp,
}

impl Language {
    /// Detect language from file extension. Returns `None` for anything the
    /// indexer has no extractor for.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "ts" | "tsx" => Some(Language::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "java" => Some(Language::Java),
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some(Language::Cpp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }
}

/// A callable extracted from a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    /// Display form: name, parameter list, return type when present.
    pub signature: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// One import/include statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Raw import source text, e.g. `./auth/login` or `fmt`.
    pub source: String,
    pub symbols: Vec<String>,
    /// False only for in-project references that import resolution may map
    /// to another file.
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// A named type declaration. `kind` carries the language-specific flavor:
/// interface, struct, enum, trait, typedef, namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    pub name: String,
    pub kind: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// Everything extracted from one file. Replaced wholesale on every
/// re-index, never field-patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub language: Language,
    pub module: String,
    pub fingerprint: String,
    pub lines: u32,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub types: Vec<TypeRecord>,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<String>,
    pub is_entry_point: bool,
}

/// A named group of files, the unit of dependency tracking.
/// `depends_on`/`depended_by` are always recomputed from file-level import
/// data, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub files: Vec<String>,
    pub depends_on: Vec<String>,
    pub depended_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub root: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub total_files: u32,
    pub total_functions: u32,
    pub total_classes: u32,
    pub languages: BTreeMap<String, u32>,
    pub modules: Vec<String>,
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    pub languages: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// Root aggregate. `modules` and `files` are ordered maps so the persisted
/// document serializes with stable key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub version: String,
    pub project: ProjectInfo,
    pub built_at: String,
    pub revision: Option<String>,
    pub config: GraphConfig,
    pub summary: GraphSummary,
    pub modules: BTreeMap<String, Module>,
    pub files: BTreeMap<String, FileEntry>,
}

impl Graph {
    /// Create an empty graph for a project.
    pub fn new(project_name: &str, root: &str) -> Self {
        Graph {
            version: SCHEMA_VERSION.to_string(),
            project: ProjectInfo {
                name: project_name.to_string(),
                root: root.to_string(),
            },
            built_at: now_utc(),
            revision: None,
            config: GraphConfig::default(),
            summary: GraphSummary::default(),
            modules: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }
}

/// Metadata document persisted next to the graph. The fingerprint map is
/// the differ's input on the next run, one entry per file in `files` at
/// save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMeta {
    pub last_build_at: String,
    pub revision: Option<String>,
    #[serde(default)]
    pub build_duration_ms: u64,
    #[serde(default)]
    pub fingerprints: BTreeMap<String, String>,
}

/// Content fingerprint: sha256 of the raw bytes, truncated to 16 hex chars.
/// Identical bytes always produce the identical fingerprint; it is the sole
/// signal used to decide "unchanged".
pub fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("sha256:{}", &hex[..16])
}

/// Current UTC time as an RFC 3339 string with millisecond precision.
pub fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_content_addressed() {
        let a = fingerprint(b"hello world");
        let b = fingerprint(b"hello world");
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
        assert_eq!(a.len(), "sha256:".len() + 16);
        assert_ne!(a, fingerprint(b"hello worlds"));
    }

    #[test]
    fn language_detection() {
        let cases = [
            ("foo.ts", Some(Language::TypeScript)),
            ("foo.tsx", Some(Language::TypeScript)),
            ("foo.mjs", Some(Language::JavaScript)),
            ("foo.py", Some(Language::Python)),
            ("foo.go", Some(Language::Go)),
            ("foo.rs", Some(Language::Rust)),
            ("Foo.java", Some(Language::Java)),
            ("foo.h", Some(Language::C)),
            ("foo.hpp", Some(Language::Cpp)),
            ("foo.txt", None),
            ("foo.json", None),
        ];
        for (name, expected) in cases {
            assert_eq!(Language::from_path(Path::new(name)), expected, "{name}");
        }
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new("myproject", "/home/user/myproject");
        assert_eq!(g.version, SCHEMA_VERSION);
        assert_eq!(g.project.name, "myproject");
        assert_eq!(g.summary.total_files, 0);
        assert!(g.modules.is_empty());
    }

    #[test]
    fn graph_round_trips_through_json() {
        let g = Graph::new("test", "/tmp/test");
        let json = serde_json::to_string(&g).unwrap();
        let parsed: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, g);
    }

    #[test]
    fn file_entry_serializes_camel_case() {
        let entry = FileEntry {
            language: Language::TypeScript,
            module: "auth".to_string(),
            fingerprint: "sha256:aabbccdd11223344".to_string(),
            lines: 10,
            functions: vec![],
            classes: vec![],
            types: vec![],
            imports: vec![],
            exports: vec![],
            is_entry_point: true,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"isEntryPoint\":true"));
        assert!(json.contains("\"language\":\"typescript\""));
    }
}
