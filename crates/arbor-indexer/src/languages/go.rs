//! Go extractor
//!
//! Visibility is the identifier convention: an uppercase first letter
//! exports a top-level function, method, or type. Go has no relative-import
//! syntax, so every import is classified external and contributes no
//! cross-module edges.

use tree_sitter::{Node, Tree};

use super::{
    end_line, node_text, start_line, strip_quotes, walk_tree, LanguageExtractor, RawExport,
    RawFunction, RawImport, RawType,
};

pub struct GoExtractor;

impl LanguageExtractor for GoExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            match node.kind() {
                "function_declaration" | "method_declaration" => {}
                _ => return,
            }
            let Some(name_node) = node.child_by_field_name("name") else { return };
            let base = node_text(name_node, source);
            // methods are receiver-qualified so Server.Start and
            // Client.Start stay distinguishable
            let name = match receiver_type(node, source) {
                Some(receiver) => format!("{receiver}.{base}"),
                None => base.to_string(),
            };
            functions.push(RawFunction {
                name,
                params: node
                    .child_by_field_name("parameters")
                    .map(|p| param_names(p, source))
                    .unwrap_or_default(),
                ret: node
                    .child_by_field_name("result")
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
            if node.kind() != "import_spec" {
                return;
            }
            let mut path_node = None;
            let mut alias_node = None;
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "interpreted_string_literal" => path_node = Some(child),
                    "package_identifier" | "identifier" | "dot" | "blank_identifier" => {
                        alias_node = Some(child)
                    }
                    _ => {}
                }
            }
            let Some(path_node) = path_node else { return };
            let src = strip_quotes(node_text(path_node, source));
            let symbol = match alias_node {
                Some(alias) => node_text(alias, source).to_string(),
                None => src.rsplit('/').next().unwrap_or(&src).to_string(),
            };
            imports.push(RawImport {
                source: src,
                symbols: vec![symbol],
                is_external: true,
            });
        });
        imports
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        let mut exports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| match node.kind() {
            "function_declaration" | "method_declaration" => {
                if let Some(n) = node.child_by_field_name("name") {
                    let name = node_text(n, source);
                    if is_exported(name) {
                        exports.push(RawExport {
                            name: name.to_string(),
                            kind: "function",
                        });
                    }
                }
            }
            "type_spec" => {
                if let Some(n) = node.child_by_field_name("name") {
                    let name = node_text(n, source);
                    if is_exported(name) {
                        let kind = node
                            .child_by_field_name("type")
                            .map(|t| match t.kind() {
                                "struct_type" => "struct",
                                "interface_type" => "interface",
                                _ => "type",
                            })
                            .unwrap_or("type");
                        exports.push(RawExport {
                            name: name.to_string(),
                            kind,
                        });
                    }
                }
            }
            _ => {}
        });
        exports
    }

    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType> {
        let mut types = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "type_spec" {
                return;
            }
            let Some(type_node) = node.child_by_field_name("type") else { return };
            let kind = match type_node.kind() {
                "struct_type" => "struct",
                "interface_type" => "interface",
                _ => return,
            };
            if let Some(name_node) = node.child_by_field_name("name") {
                // span the whole `type ( ... )` declaration when present
                let decl = node
                    .parent()
                    .filter(|p| p.kind() == "type_declaration")
                    .unwrap_or(node);
                types.push(RawType {
                    name: node_text(name_node, source).to_string(),
                    kind,
                    start_line: start_line(decl),
                    end_line: end_line(decl),
                });
            }
        });
        types
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

/// Receiver type of a method declaration, pointer sigil stripped.
fn receiver_type(node: Node, source: &[u8]) -> Option<String> {
    let receiver = node.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    for param in receiver.children(&mut cursor) {
        if param.kind() == "parameter_declaration" {
            if let Some(ty) = param.child_by_field_name("type") {
                return Some(node_text(ty, source).trim_start_matches('*').to_string());
            }
        }
    }
    None
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        if child.kind() == "parameter_declaration"
            || child.kind() == "variadic_parameter_declaration"
        {
            let mut c = child.walk();
            for p in child.children(&mut c) {
                if p.kind() == "identifier" {
                    params.push(node_text(p, source).to_string());
                    break;
                }
            }
        }
    }
    params
}
