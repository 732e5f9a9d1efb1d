//! Python extractor
//!
//! Exports are the contents of a module-level `__all__` list when present,
//! otherwise every top-level function and class. Decorated definitions are
//! unwrapped to find the underlying declaration but keep the decorator's
//! line span.

use tree_sitter::{Node, Tree};

use super::{
    end_line, node_text, start_line, strip_quotes, walk_tree, LanguageExtractor, RawExport,
    RawFunction, RawImport, RawType,
};

pub struct PythonExtractor;

impl LanguageExtractor for PythonExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            let Some(func) = unwrap_decorated(child, "function_definition") else {
                continue;
            };
            let Some(name_node) = func.child_by_field_name("name") else {
                continue;
            };
            functions.push(RawFunction {
                name: node_text(name_node, source).to_string(),
                params: func
                    .child_by_field_name("parameters")
                    .map(|p| param_names(p, source))
                    .unwrap_or_default(),
                ret: func
                    .child_by_field_name("return_type")
                    .map(|t| node_text(t, source).to_string()),
                start_line: start_line(child),
                end_line: end_line(child),
            });
        }
        functions
    }

    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport> {
        let mut imports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| match node.kind() {
            "import_statement" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    let name = match child.kind() {
                        "dotted_name" => Some(node_text(child, source).to_string()),
                        "aliased_import" => child
                            .named_child(0)
                            .map(|n| node_text(n, source).to_string()),
                        _ => None,
                    };
                    if let Some(name) = name {
                        imports.push(RawImport {
                            is_external: !name.starts_with('.'),
                            symbols: vec![name.clone()],
                            source: name,
                        });
                    }
                }
            }
            "import_from_statement" => {
                let module = node
                    .child_by_field_name("module_name")
                    .map(|n| node_text(n, source).to_string())
                    .unwrap_or_default();
                let mut symbols = Vec::new();
                let mut past_import = false;
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.kind() == "import" {
                        past_import = true;
                        continue;
                    }
                    if !past_import {
                        continue;
                    }
                    match child.kind() {
                        "dotted_name" | "identifier" => {
                            symbols.push(node_text(child, source).to_string());
                        }
                        "aliased_import" => {
                            if let Some(n) = child.named_child(0) {
                                symbols.push(node_text(n, source).to_string());
                            }
                        }
                        "wildcard_import" => symbols.push("*".to_string()),
                        _ => {}
                    }
                }
                imports.push(RawImport {
                    is_external: !module.starts_with('.'),
                    source: module,
                    symbols,
                });
            }
            _ => {}
        });
        imports
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        if let Some(named) = dunder_all(tree, source) {
            return named
                .into_iter()
                .map(|name| RawExport { name, kind: "variable" })
                .collect();
        }

        let mut exports = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if let Some(func) = unwrap_decorated(child, "function_definition") {
                if let Some(n) = func.child_by_field_name("name") {
                    exports.push(RawExport {
                        name: node_text(n, source).to_string(),
                        kind: "function",
                    });
                }
            } else if let Some(class) = unwrap_decorated(child, "class_definition") {
                if let Some(n) = class.child_by_field_name("name") {
                    exports.push(RawExport {
                        name: node_text(n, source).to_string(),
                        kind: "class",
                    });
                }
            }
        }
        exports
    }

    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType> {
        let mut types = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            let Some(class) = unwrap_decorated(child, "class_definition") else {
                continue;
            };
            if let Some(name_node) = class.child_by_field_name("name") {
                types.push(RawType {
                    name: node_text(name_node, source).to_string(),
                    kind: "class",
                    start_line: start_line(child),
                    end_line: end_line(child),
                });
            }
        }
        types
    }
}

/// Peel a `decorated_definition` wrapper off the expected declaration kind.
fn unwrap_decorated<'a>(node: Node<'a>, expected: &str) -> Option<Node<'a>> {
    if node.kind() == expected {
        return Some(node);
    }
    if node.kind() == "decorated_definition" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == expected {
                return Some(child);
            }
        }
    }
    None
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        match child.kind() {
            "identifier" => params.push(node_text(child, source).to_string()),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                if let Some(n) = child.named_child(0) {
                    params.push(node_text(n, source).to_string());
                }
            }
            _ => {}
        }
    }
    params
}

/// A top-level `__all__ = [...]` assignment, if one exists.
fn dunder_all(tree: &Tree, source: &[u8]) -> Option<Vec<String>> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let assignment = if child.kind() == "expression_statement" {
            child.named_child(0).filter(|n| n.kind() == "assignment")
        } else if child.kind() == "assignment" {
            Some(child)
        } else {
            None
        };
        let Some(assignment) = assignment else { continue };
        let Some(left) = assignment.child_by_field_name("left") else { continue };
        if node_text(left, source) != "__all__" {
            continue;
        }
        let Some(right) = assignment.child_by_field_name("right") else { continue };
        if right.kind() != "list" {
            return None;
        }
        let mut names = Vec::new();
        let mut c = right.walk();
        for item in right.children(&mut c) {
            if item.kind() == "string" {
                names.push(strip_quotes(node_text(item, source)));
            }
        }
        return Some(names);
    }
    None
}
