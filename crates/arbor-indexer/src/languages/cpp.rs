//! C++ extractor
//!
//! Shares the C extraction routines; function names may carry `::`
//! qualifiers from out-of-class definitions. Adds enum and namespace type
//! records on top of the shared struct/class extraction.

use tree_sitter::Tree;

use super::c::{extract_exports, extract_functions, extract_includes, extract_struct_types};
use super::{
    end_line, node_text, start_line, walk_tree, LanguageExtractor, RawExport, RawFunction,
    RawImport, RawType,
};

pub struct CppExtractor;

impl LanguageExtractor for CppExtractor {
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
        let mut types = extract_struct_types(tree, source);
        walk_tree(tree.root_node(), &mut |node| match node.kind() {
            "enum_specifier" => {
                if node.child_by_field_name("body").is_none() {
                    return;
                }
                if let Some(n) = node.child_by_field_name("name") {
                    types.push(RawType {
                        name: node_text(n, source).to_string(),
                        kind: "enum",
                        start_line: start_line(node),
                        end_line: end_line(node),
                    });
                }
            }
            "namespace_definition" => {
                if let Some(n) = node.child_by_field_name("name") {
                    types.push(RawType {
                        name: node_text(n, source).to_string(),
                        kind: "namespace",
                        start_line: start_line(node),
                        end_line: end_line(node),
                    });
                }
            }
            _ => {}
        });
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserPool;
    use arbor_core::Language;

    fn parse(source: &str) -> Tree {
        let mut pool = ParserPool::for_languages([Language::Cpp]).unwrap();
        pool.parse(Language::Cpp, source.as_bytes()).unwrap()
    }

    #[test]
    fn extracts_free_functions_and_methods() {
        let src = r#"
#include <string>

class Engine {
public:
    void start() {}
};

void Engine::stop() {}

int main() {
    return 0;
}
"#;
        let tree = parse(src);
        let fns = CppExtractor.functions(&tree, src.as_bytes());
        assert!(fns.iter().any(|f| f.name == "main"));
        assert!(fns.iter().any(|f| f.name == "Engine::stop"));
    }

    #[test]
    fn include_classification() {
        let src = "#include <vector>\n#include \"engine.h\"\n";
        let tree = parse(src);
        let imports = CppExtractor.imports(&tree, src.as_bytes());
        assert!(imports.iter().any(|i| i.source == "vector" && i.is_external));
        assert!(imports.iter().any(|i| i.source == "engine.h" && !i.is_external));
    }

    #[test]
    fn classes_enums_and_namespaces() {
        let src = r#"
namespace mylib {

class Animal {
public:
    void speak() {}
};

struct Point {
    int x, y;
};

enum class Mode { Fast, Slow };

}
"#;
        let tree = parse(src);
        let types = CppExtractor.types(&tree, src.as_bytes());
        assert!(types.iter().any(|t| t.name == "Animal" && t.kind == "class"));
        assert!(types.iter().any(|t| t.name == "Point" && t.kind == "struct"));
        assert!(types.iter().any(|t| t.name == "Mode" && t.kind == "enum"));
        assert!(types
            .iter()
            .any(|t| t.name == "mylib" && t.kind == "namespace"));
    }

    #[test]
    fn namespaces_are_not_exported() {
        let src = "namespace mylib {\n    void helper() {}\n}\n";
        let tree = parse(src);
        let exports = CppExtractor.exports(&tree, src.as_bytes());
        assert!(!exports.iter().any(|e| e.name == "mylib"));
        assert!(exports.iter().any(|e| e.name == "helper"));
    }
}
