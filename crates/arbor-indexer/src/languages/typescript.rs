//! TypeScript extractor
//!
//! Exports are the names appearing in `export` constructs. Imports are
//! external unless the source starts with a relative-path marker. Also
//! covers `.tsx` input, whose JSX-specific constructs simply fall out of
//! extraction.

use tree_sitter::{Node, Tree};

use super::{
    child_of_kind, end_line, node_text, start_line, strip_quotes, walk_tree, LanguageExtractor,
    RawExport, RawFunction, RawImport, RawType,
};

pub struct TypeScriptExtractor;

impl LanguageExtractor for TypeScriptExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() == "function_declaration" {
                if let Some(f) = function_declaration(node, source) {
                    functions.push(f);
                }
            }
            // const foo = (...) => {...} at top level or behind `export`
            if node.kind() == "lexical_declaration" && is_top_level(node) {
                functions.extend(arrow_functions(node, source));
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
                // default import
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
                ("interface_declaration", "interface"),
                ("type_alias_declaration", "type"),
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
            // export const/let/var
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
            // export { a, b }
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
            let kind = match node.kind() {
                "class_declaration" => "class",
                "interface_declaration" => "interface",
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

fn is_top_level(node: Node) -> bool {
    node.parent()
        .map(|p| p.kind() == "program" || p.kind() == "export_statement")
        .unwrap_or(false)
}

fn function_declaration(node: Node, source: &[u8]) -> Option<RawFunction> {
    let name_node = node.child_by_field_name("name")?;
    Some(RawFunction {
        name: node_text(name_node, source).to_string(),
        params: node
            .child_by_field_name("parameters")
            .map(|p| param_names(p, source))
            .unwrap_or_default(),
        ret: return_annotation(node, source),
        start_line: start_line(node),
        end_line: end_line(node),
    })
}

fn arrow_functions(decl: Node, source: &[u8]) -> Vec<RawFunction> {
    let mut functions = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.children(&mut cursor) {
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
            ret: return_annotation(value, source),
            start_line: start_line(decl),
            end_line: end_line(decl),
        });
    }
    functions
}

/// `return_type` is a type_annotation node whose text carries a leading `:`.
fn return_annotation(node: Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("return_type")
        .map(|t| node_text(t, source).trim_start_matches(':').trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Parameter names only: strip the parentheses, split on commas, drop each
/// entry's type annotation.
fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let text = node_text(params_node, source);
    let inner = text.trim_start_matches('(').trim_end_matches(')');
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|s| s.trim().split(':').next().unwrap_or("").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
