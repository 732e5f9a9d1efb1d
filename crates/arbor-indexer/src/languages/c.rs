//! C extractor
//!
//! C has no export keyword; visibility is a convention. Every non-`static`
//! free function and every named struct/enum/typedef counts as exported.
//! An include is external when it uses angle-bracket syntax; quoted
//! includes are in-project references resolved against the including
//! file's directory.
//!
//! The extraction routines are shared with the C++ extractor.

use tree_sitter::{Node, Tree};

use super::{
    child_of_kind, descendant_of_kind, end_line, node_text, start_line, walk_tree,
    LanguageExtractor, RawExport, RawFunction, RawImport, RawType,
};

pub struct CExtractor;

impl LanguageExtractor for CExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        extract_functions(tree, source)
    }

    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport> {
        extract_includes(tree, source)
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        extract_exports(tree, source)
    }

    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType> {
        extract_struct_types(tree, source)
    }
}

pub(super) fn extract_functions(tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
    let mut functions = Vec::new();
    walk_tree(tree.root_node(), &mut |node| {
        if node.kind() != "function_definition" {
            return;
        }
        let Some(declarator) = descendant_of_kind(node, "function_declarator") else {
            return;
        };
        let Some(name_node) = declarator.child_by_field_name("declarator") else {
            return;
        };
        functions.push(RawFunction {
            name: node_text(name_node, source).to_string(),
            params: declarator
                .child_by_field_name("parameters")
                .map(|p| param_names(p, source))
                .unwrap_or_default(),
            ret: node
                .child_by_field_name("type")
                .map(|t| node_text(t, source).to_string()),
            start_line: start_line(node),
            end_line: end_line(node),
        });
    });
    functions
}

pub(super) fn extract_includes(tree: &Tree, source: &[u8]) -> Vec<RawImport> {
    let mut imports = Vec::new();
    walk_tree(tree.root_node(), &mut |node| {
        if node.kind() != "preproc_include" {
            return;
        }
        let path_node = child_of_kind(node, "system_lib_string")
            .or_else(|| child_of_kind(node, "string_literal"));
        let Some(path_node) = path_node else { return };
        let is_system = path_node.kind() == "system_lib_string";
        let raw = node_text(path_node, source)
            .trim_matches(|c| c == '<' || c == '>' || c == '"')
            .to_string();
        imports.push(RawImport {
            source: raw,
            symbols: Vec::new(),
            is_external: is_system,
        });
    });
    imports
}

pub(super) fn extract_exports(tree: &Tree, source: &[u8]) -> Vec<RawExport> {
    let mut exports = Vec::new();
    let mut seen = std::collections::HashSet::new();
    walk_tree(tree.root_node(), &mut |node| match node.kind() {
        "function_definition" => {
            if is_static(node, source) {
                return;
            }
            if let Some(declarator) = descendant_of_kind(node, "function_declarator") {
                if let Some(name_node) = declarator.child_by_field_name("declarator") {
                    let name = bare_identifier(node_text(name_node, source));
                    if seen.insert(name.clone()) {
                        exports.push(RawExport { name, kind: "function" });
                    }
                }
            }
        }
        "struct_specifier" | "class_specifier" => {
            // skip forward declarations
            if node.child_by_field_name("body").is_none() {
                return;
            }
            if let Some(n) = node.child_by_field_name("name") {
                let name = node_text(n, source).to_string();
                if seen.insert(name.clone()) {
                    exports.push(RawExport { name, kind: "struct" });
                }
            }
        }
        "enum_specifier" => {
            if let Some(n) = node.child_by_field_name("name") {
                let name = node_text(n, source).to_string();
                if seen.insert(name.clone()) {
                    exports.push(RawExport { name, kind: "enum" });
                }
            }
        }
        "type_definition" => {
            if let Some(n) = descendant_of_kind(node, "type_identifier") {
                let name = node_text(n, source).to_string();
                if seen.insert(name.clone()) {
                    exports.push(RawExport { name, kind: "typedef" });
                }
            }
        }
        _ => {}
    });
    exports
}

pub(super) fn extract_struct_types(tree: &Tree, source: &[u8]) -> Vec<RawType> {
    let mut types = Vec::new();
    walk_tree(tree.root_node(), &mut |node| {
        let kind = match node.kind() {
            "struct_specifier" => "struct",
            "class_specifier" => "class",
            _ => return,
        };
        if node.child_by_field_name("body").is_none() {
            return;
        }
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

fn is_static(func_def: Node, source: &[u8]) -> bool {
    let mut cursor = func_def.walk();
    for child in func_def.children(&mut cursor) {
        if child.kind() == "storage_class_specifier" && node_text(child, source) == "static" {
            return true;
        }
    }
    false
}

/// Strip a `Namespace::` qualifier off a declarator name.
fn bare_identifier(text: &str) -> String {
    match text.rfind("::") {
        Some(idx) => text[idx + 2..].to_string(),
        None => text.to_string(),
    }
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        if child.kind() == "parameter_declaration" {
            if let Some(declarator) = child.child_by_field_name("declarator") {
                params.push(node_text(declarator, source).trim_start_matches('*').to_string());
            }
        }
    }
    params
}
