//! JavaScript extractor
//!
//! Same shape as the TypeScript extractor against the JS grammar: no type
//! annotations, so parameters are kept as written and there is never a
//! return type.

use tree_sitter::{Node, Tree};

use super::{
    child_of_kind, end_line, node_text, start_line, strip_quotes, walk_tree, LanguageExtractor,
    RawExport, RawFunction, RawImport, RawType,
};

pub struct JavaScriptExtractor;

impl LanguageExtractor for JavaScriptExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() == "function_declaration" {
                if let Some(name_node) = node.child_by_field_name("name") {
                    functions.push(RawFunction {
                        name: node_text(name_node, source).to_string(),
                        params: node
                            .child_by_field_name("parameters")
                            .map(|p| param_names(p, source))
                            .unwrap_or_default(),
                        ret: None,
                        start_line: start_line(node),
                        end_line: end_line(node),
                    });
                }
            }
            if node.kind() == "lexical_declaration" && is_top_level(node) {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.kind() != "variable_declarator" {
                        continue;
                    }
                    let Some(value) = child.child_by_field_name("value") else { continue };
                    if value.kind() != "arrow_function" {
                        continue;
                    }
                    let Some(name_node) = child.child_by_field_name("name") else { continue };
                    functions.push(RawFunction {
                        name: node_text(name_node, source).to_string(),
                        params: value
                            .child_by_field_name("parameters")
                            .map(|p| param_names(p, source))
                            .unwrap_or_default(),
                        ret: None,
                        start_line: start_line(node),
                        end_line: end_line(node),
                    });
                }
            }
        });
        functions
    }

    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport> {
        let mut imports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "import_statement" {
                return;
            }
            let source_node = node
                .child_by_field_name("source")
                .or_else(|| child_of_kind(node, "string"));
            let Some(source_node) = source_node else { return };
            let src = strip_quotes(node_text(source_node, source));

            let mut symbols = Vec::new();
            if let Some(clause) = child_of_kind(node, "import_clause") {
                if let Some(named) = child_of_kind(clause, "named_imports") {
                    let mut c = named.walk();
                    for spec in named.children(&mut c) {
                        if spec.kind() == "import_specifier" {
                            let name = spec
                                .child_by_field_name("name")
                                .or_else(|| spec.named_child(0));
                            if let Some(n) = name {
                                symbols.push(node_text(n, source).to_string());
                            }
                        }
                    }
                }
                let mut c = clause.walk();
                for child in clause.children(&mut c) {
                    if child.kind() == "identifier" {
                        symbols.push(node_text(child, source).to_string());
                    }
                }
            }

            let is_external = !src.starts_with('.');
            imports.push(RawImport { source: src, symbols, is_external });
        });
        imports
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        let mut exports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "export_statement" {
                return;
            }
            for (child_kind, kind) in [
                ("function_declaration", "function"),
                ("class_declaration", "class"),
            ] {
                if let Some(decl) = child_of_kind(node, child_kind) {
                    if let Some(n) = decl.child_by_field_name("name") {
                        exports.push(RawExport {
                            name: node_text(n, source).to_string(),
                            kind,
                        });
                    }
                }
            }
            if let Some(lex) = child_of_kind(node, "lexical_declaration") {
                let mut c = lex.walk();
                for decl in lex.children(&mut c) {
                    if decl.kind() == "variable_declarator" {
                        if let Some(n) = decl.child_by_field_name("name") {
                            exports.push(RawExport {
                                name: node_text(n, source).to_string(),
                                kind: "variable",
                            });
                        }
                    }
                }
            }
            if let Some(clause) = child_of_kind(node, "export_clause") {
                let mut c = clause.walk();
                for spec in clause.children(&mut c) {
                    if spec.kind() == "export_specifier" {
                        let name = spec
                            .child_by_field_name("name")
                            .or_else(|| spec.named_child(0));
                        if let Some(n) = name {
                            exports.push(RawExport {
                                name: node_text(n, source).to_string(),
                                kind: "variable",
                            });
                        }
                    }
                }
            }
        });
        exports
    }

    fn types(&self, tree: &Tree, source: &[u8]) -> Vec<RawType> {
        let mut types = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "class_declaration" {
                return;
            }
            if let Some(n) = node.child_by_field_name("name") {
                types.push(RawType {
                    name: node_text(n, source).to_string(),
                    kind: "class",
                    start_line: start_line(node),
                    end_line: end_line(node),
                });
            }
        });
        types
    }
}

fn is_top_level(node: Node) -> bool {
    node.parent()
        .map(|p| p.kind() == "program" || p.kind() == "export_statement")
        .unwrap_or(false)
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let text = node_text(params_node, source);
    let inner = text.trim_start_matches('(').trim_end_matches(')');
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
