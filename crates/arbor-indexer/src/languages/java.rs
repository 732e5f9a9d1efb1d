//! Java extractor
//!
//! Exports are declarations carrying a `public` modifier. Methods are
//! qualified with their enclosing class. Java has no relative-import
//! syntax, so every import is classified external.

use tree_sitter::{Node, Tree};

use super::{
    end_line, node_text, start_line, walk_tree, LanguageExtractor, RawExport, RawFunction,
    RawImport, RawType,
};

pub struct JavaExtractor;

impl LanguageExtractor for JavaExtractor {
    fn functions(&self, tree: &Tree, source: &[u8]) -> Vec<RawFunction> {
        let mut functions = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "method_declaration" && node.kind() != "constructor_declaration" {
                return;
            }
            let Some(name_node) = node.child_by_field_name("name") else { return };
            let base = node_text(name_node, source);
            let name = match enclosing_class_name(node, source) {
                Some(class) => format!("{class}.{base}"),
                None => base.to_string(),
            };
            functions.push(RawFunction {
                name,
                params: node
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

    fn imports(&self, tree: &Tree, source: &[u8]) -> Vec<RawImport> {
        let mut imports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            if node.kind() != "import_declaration" {
                return;
            }
            // "import static java.util.List;" -> "java.util.List"
            let path = node_text(node, source)
                .trim()
                .trim_start_matches("import")
                .trim()
                .trim_start_matches("static")
                .trim()
                .trim_end_matches(';')
                .trim()
                .to_string();
            let (source_path, symbols) = match path.rfind('.') {
                Some(last_dot) => (
                    path[..last_dot].to_string(),
                    vec![path[last_dot + 1..].to_string()],
                ),
                None => (path, Vec::new()),
            };
            imports.push(RawImport {
                source: source_path,
                symbols,
                is_external: true,
            });
        });
        imports
    }

    fn exports(&self, tree: &Tree, source: &[u8]) -> Vec<RawExport> {
        let mut exports = Vec::new();
        walk_tree(tree.root_node(), &mut |node| {
            let kind = match node.kind() {
                "class_declaration" => "class",
                "interface_declaration" => "interface",
                "enum_declaration" => "enum",
                _ => return,
            };
            if !has_modifier(node, source, "public") {
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
                "class_declaration" => "class",
                "interface_declaration" => "interface",
                "enum_declaration" => "enum",
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

fn enclosing_class_name(node: Node, source: &[u8]) -> Option<String> {
    let mut current = node.parent();
    while let Some(n) = current {
        if matches!(n.kind(), "class_body" | "interface_body" | "enum_body") {
            if let Some(decl) = n.parent() {
                if let Some(name) = decl.child_by_field_name("name") {
                    return Some(node_text(name, source).to_string());
                }
            }
        }
        current = n.parent();
    }
    None
}

fn has_modifier(node: Node, source: &[u8], modifier: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            let mut c = child.walk();
            for m in child.children(&mut c) {
                if node_text(m, source) == modifier {
                    return true;
                }
            }
        }
    }
    false
}

fn param_names(params_node: Node, source: &[u8]) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        if child.kind() == "formal_parameter" || child.kind() == "spread_parameter" {
            if let Some(n) = child.child_by_field_name("name") {
                params.push(node_text(n, source).to_string());
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserPool;
    use arbor_core::Language;

    fn parse(source: &str) -> Tree {
        let mut pool = ParserPool::for_languages([Language::Java]).unwrap();
        pool.parse(Language::Java, source.as_bytes()).unwrap()
    }

    #[test]
    fn qualifies_methods_with_class() {
        let src = r#"
public class Greeter {
    public String greet(String name) {
        return "Hello " + name;
    }
    private void helper() {}
}
"#;
        let tree = parse(src);
        let fns = JavaExtractor.functions(&tree, src.as_bytes());
        assert!(fns.iter().any(|f| f.name == "Greeter.greet"));
        assert!(fns.iter().any(|f| f.name == "Greeter.helper"));
        let greet = fns.iter().find(|f| f.name == "Greeter.greet").unwrap();
        assert_eq!(greet.params, vec!["name"]);
        assert_eq!(greet.ret.as_deref(), Some("String"));
    }

    #[test]
    fn imports_are_always_external() {
        let src = "import java.util.List;\nimport static java.lang.Math.max;\n";
        let tree = parse(src);
        let imports = JavaExtractor.imports(&tree, src.as_bytes());
        assert!(imports.iter().all(|i| i.is_external));
        assert!(imports
            .iter()
            .any(|i| i.source == "java.util" && i.symbols == vec!["List"]));
        assert!(imports
            .iter()
            .any(|i| i.source == "java.lang.Math" && i.symbols == vec!["max"]));
    }

    #[test]
    fn public_modifier_drives_exports() {
        let src = r#"
public class Animal {
    public void speak() {}
}
public interface Runnable {}
class Hidden {}
"#;
        let tree = parse(src);
        let exports = JavaExtractor.exports(&tree, src.as_bytes());
        assert!(exports.iter().any(|e| e.name == "Animal" && e.kind == "class"));
        assert!(exports
            .iter()
            .any(|e| e.name == "Runnable" && e.kind == "interface"));
        assert!(!exports.iter().any(|e| e.name == "Hidden"));
    }

    #[test]
    fn extracts_type_declarations() {
        let src = "public enum Status { OK, ERROR }\nclass Point {}\n";
        let tree = parse(src);
        let types = JavaExtractor.types(&tree, src.as_bytes());
        assert!(types.iter().any(|t| t.name == "Status" && t.kind == "enum"));
        assert!(types.iter().any(|t| t.name == "Point" && t.kind == "class"));
    }
}
