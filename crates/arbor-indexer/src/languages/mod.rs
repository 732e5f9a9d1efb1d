//! Per-language structural extractors
//!
//! One adapter per supported language, all behind [`LanguageExtractor`].
//! Adapters return raw records; signature assembly and the class/type split
//! happen one layer up in the file indexer. Constructs an adapter does not
//! recognize are silently omitted, never an error.

pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod typescript;

use arbor_core::Language;
use tree_sitter::{Node, Tree};

/// A callable, before signature assembly.
#[derive(Debug, Clone)]
pub struct RawFunction {
    /// Plain name, or receiver-qualified (`Type::method`, `Type.method`)
    /// for methods in languages where that matters.
    pub name: String,
    pub params: Vec<String>,
    pub ret: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

/// One import/include statement with per-language external classification.
#[derive(Debug, Clone)]
pub struct RawImport {
    pub source: String,
    pub symbols: Vec<String>,
    pub is_external: bool,
}

/// One exported name.
#[derive(Debug, Clone)]
pub struct RawExport {
    pub name: String,
    pub kind: &'static str,
}

/// A type-like declaration (class, interface, struct, enum, trait, typedef,
/// namespace).
#[derive(Debug, Clone)]
pub struct RawType {
    pub name: String,
    pub kind: &'static str,
    pub start_line: u32,
    pub end_line: u32,
}

/// The structural-extraction contract: four operations over one parsed tree.
pub trait LanguageExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction>;
    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport>;
    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport>;
    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType>;
}

/// Adapter dispatch over the closed language set. Adding a language is a
/// compile-time-checked addition of one arm and one module.
pub fn extractor_for(language: Language) -> Box<dyn LanguageExtractor> {
    match language {
        Language::TypeScript => Box::new(typescript::TypeScriptExtractor),
        Language::JavaScript => Box::new(javascript::JavaScriptExtractor),
        Language::Python => Box::new(python::PythonExtractor),
        Language::Go => Box::new(go::GoExtractor),
        Language::Rust => Box::new(rust::RustExtractor),
        Language::Java => Box::new(java::JavaExtractor),
        Language::C => Box::new(c::CExtractor),
        Language::Cpp => Box::new(cpp::CppExtractor),
    }
}

// ── Shared tree-walking helpers ─────────────────────────────────────────────

/// Depth-first visit of every node in the tree.
pub(crate) fn walk_tree<F>(node: Node, visitor: &mut F)
where
    F: FnMut(Node),
{
    visitor(node);
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            walk_tree(cursor.node(), visitor);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

/// First direct child of the given kind.
pub(crate) fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

/// First descendant of the given kind, breadth-first.
pub(crate) fn descendant_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut queue = std::collections::VecDeque::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        queue.push_back(child);
    }
    while let Some(current) = queue.pop_front() {
        if current.kind() == kind {
            return Some(current);
        }
        let mut c = current.walk();
        for child in current.children(&mut c) {
            queue.push_back(child);
        }
    }
    None
}

/// Node text, empty on invalid UTF-8.
pub(crate) fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

pub(crate) fn strip_quotes(s: &str) -> String {
    s.trim_matches(|c| c == '\'' || c == '"' || c == '`').to_string()
}

/// 1-based start line.
pub(crate) fn start_line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-based end line, inclusive.
pub(crate) fn end_line(node: Node) -> u32 {
    node.end_position().row as u32 + 1
}
