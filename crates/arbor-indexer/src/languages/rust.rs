//! Rust extractor
//!
//! Exports are `pub` items, excluding anything nested inside an `impl`
//! block; only free-standing items count. Functions inside an impl are
//! qualified with the implemented type so `Server::start` and
//! `Client::start` stay distinguishable.

use tree_sitter::{Node, Tree};

use super::{
    child_of_kind, end_line, node_text, start_line, walk_tree, LanguageExtractor, RawExport,
    RawFunction, RawImport, RawType,
};

pub struct RustExtractor;

impl LanguageExtractor for RustExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "function_item" {
                return;
            }
            let Some(name_node) = node.child_by_field_name("name") else { return };
            let base = node_text(name_node, source);
            let name = match enclosing_impl_type(node, source) {
                Some(ty) => format!("{ty}::{base}"),
                None => base.to_string(),
            };
            functions.push(RawFunction {
                name,
                params: node
                    .child_by_field_name("parameters")
                    .map(|p| param_names(p, source))
                    .unwrap_or_default(),
                ret: node
                    .child_by_field_name("return_type")
                    .map(|r| node_text(r, source).to_string()),
                start_line: start_line(node),
                end_line: end_line(node),
            });
        });
        functions
    }

    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport> {
        let mut imports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "use_declaration" {
                return;
            }
            let mut import = RawImport {
                source: String::new(),
                symbols: Vec::new(),
                is_external: true,
            };
            parse_use_tree(node, source, &mut import);
            if !import.source.is_empty() {
                import.is_external = !import.source.starts_with('.');
                imports.push(import);
            }
        });
        imports
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        let mut exports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            let kind = match node.kind() {
                "function_item" => "function",
                "struct_item" => "struct",
                "enum_item" => "enum",
                "trait_item" => "trait",
                "type_item" => "type",
                "mod_item" => "module",
                _ => return,
            };
            if !has_pub_modifier(node, source) || inside_impl(node) {
                return;
            }
            if let Some(n) = node.child_by_field_name("name") {
                exports.push(RawExport {
                    name: node_text(n, source).to_string(),
                    kind,
                });
            }
        });
        exports
    }

    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType> {
        let mut types = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            let kind = match node.kind() {
                "struct_item" => "struct",
                "enum_item" => "enum",
                "trait_item" => "trait",
                _ => return,
            };
            if let Some(n) = node.child_by_field_name("name") {
                types.push(RawType {
                    name: node_text(n, source).to_string(),
                    kind,
                    start_line: start_line(node),
                    end_line: end_line(node),
                });
            }
        });
        types
    }
}

/// Implemented type of the nearest enclosing `impl` block, if any.
fn enclosing_impl_type(node: Node, source: &[u8]) -> Option<String> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "impl_item" {
            return n
                .child_by_field_name("type")
                .map(|t| node_text(t, source).to_string());
        }
        current = n.parent();
    }
    None
}

fn has_pub_modifier(node: Node, source: &[u8]) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "visibility_modifier" {
            return node_text(child, source).contains("pub");
        }
    }
    false
}

fn inside_impl(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "impl_item" {
            return true;
        }
        current = n.parent();
    }
    false
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        match child.kind() {
            "parameter" => {
                if let Some(pattern) = child.child_by_field_name("pattern") {
                    params.push(node_text(pattern, source).to_string());
                }
            }
            "self_parameter" | "variadic_parameter" => {
                params.push(node_text(child, source).to_string());
            }
            _ => {}
        }
    }
    params
}

fn parse_use_tree(node: Node, source: &[u8], import: &mut RawImport) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "scoped_identifier" | "scoped_use_list" => {
                if let Some(path) = child.child_by_field_name("path") {
                    import.source = node_text(path, source).to_string();
                }
                if let Some(list) = child_of_kind(child, "use_list") {
                    use_list_symbols(list, source, &mut import.symbols);
                } else if let Some(name) = child.child_by_field_name("name") {
                    import.symbols.push(node_text(name, source).to_string());
                }
                return;
            }
            "identifier" => {
                import.source = node_text(child, source).to_string();
                import.symbols.push(import.source.clone());
                return;
            }
            "use_list" => use_list_symbols(child, source, &mut import.symbols),
            _ => {}
        }
    }
}

fn use_list_symbols(list_node: Node, source: &[u8], symbols: &mut Vec<String>) {
    let mut cursor = list_node.walk();
    for child in list_node.children(&mut cursor) {
        match child.kind() {
            "identifier" | "self" => symbols.push(node_text(child, source).to_string()),
            "scoped_identifier" => {
                if let Some(n) = child.child_by_field_name("name") {
                    symbols.push(node_text(n, source).to_string());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserPool;
    use arbor_core::Language;

    fn parse(source: &str) -> Tree {
        let mut pool = ParserPool::for_languages([Language::Rust]).unwrap();
        pool.parse(Language::Rust, source.as_bytes()).unwrap()
    }

    #[test]
    fn qualifies_impl_methods() {
        let src = r#"
pub fn greet(name: &str) -> String {
    format!("Hello, {}", name)
}

fn helper() {}

struct Server;
impl Server {
    pub fn start(&self) {}
}
"#;
        let tree = parse(src);
        let fns = RustExtractor.functions(&tree, src.as_bytes());
        assert!(fns.iter().any(|f| f.name == "greet"));
        assert!(fns.iter().any(|f| f.name == "helper"));
        assert!(fns.iter().any(|f| f.name == "Server::start"));
        let greet = fns.iter().find(|f| f.name == "greet").unwrap();
        assert_eq!(greet.params, vec!["name"]);
        assert_eq!(greet.ret.as_deref(), Some("String"));
    }

    #[test]
    fn exports_are_pub_free_standing_items() {
        let src = r#"
pub fn visible() {}
fn hidden() {}
pub struct Config;
pub trait Handler {}
struct Private;
impl Config {
    pub fn method_not_exported(&self) {}
}
"#;
        let tree = parse(src);
        let exports = RustExtractor.exports(&tree, src.as_bytes());
        let names: Vec<&str> = exports.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"visible"));
        assert!(names.contains(&"Config"));
        assert!(names.contains(&"Handler"));
        assert!(!names.contains(&"hidden"));
        assert!(!names.contains(&"Private"));
        assert!(!names.contains(&"method_not_exported"));
    }

    #[test]
    fn extracts_use_declarations() {
        let src = "use std::io::{Read, Write};\nuse serde::Serialize;\nuse anyhow;\n";
        let tree = parse(src);
        let imports = RustExtractor.imports(&tree, src.as_bytes());
        assert!(imports.iter().any(|i| i.source == "std::io"
            && i.symbols.contains(&"Read".to_string())
            && i.symbols.contains(&"Write".to_string())));
        assert!(imports
            .iter()
            .any(|i| i.source == "serde" && i.symbols == vec!["Serialize"]));
        assert!(imports.iter().all(|i| i.is_external));
    }

    #[test]
    fn extracts_type_items() {
        let src = "pub struct Server {\n    host: String,\n}\npub enum Status { Ok, Err }\npub trait Handler {}\n";
        let tree = parse(src);
        let types = RustExtractor.types(&tree, src.as_bytes());
        assert!(types.iter().any(|t| t.name == "Server" && t.kind == "struct"));
        assert!(types.iter().any(|t| t.name == "Status" && t.kind == "enum"));
        assert!(types.iter().any(|t| t.name == "Handler" && t.kind == "trait"));
    }
}
