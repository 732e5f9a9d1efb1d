//! Per-file indexing
//!
//! Orchestrates extraction for one file: fingerprint, parse, run the
//! language extractor, assemble display signatures, split type records,
//! assign the module name from the path, and flag entry points.

use anyhow::Result;
use arbor_core::{
    fingerprint, ClassRecord, FileEntry, FunctionRecord, ImportRecord, Language, TypeRecord,
};

use crate::languages::{self, RawFunction, RawType};
use crate::parsers::ParserPool;

/// Conventional top-level container directories skipped when deriving a
/// module name from a path.
const CONTAINER_DIRS: &[&str] = &["src", "lib", "app", "source", "packages"];

/// Base names that mark a file as a conventional entry point.
const ENTRY_POINT_NAMES: &[&str] = &["main", "index", "server", "app", "entry", "bootstrap"];

/// Module name for a project-relative posix path: drop the filename, strip
/// leading container directories, take the first surviving segment. Files
/// with no surviving segment land in the sentinel `_root` module.
pub fn module_for_path(rel_path: &str) -> String {
    let mut segments: Vec<&str> = rel_path.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();

    let mut start = 0;
    while start < segments.len() && CONTAINER_DIRS.contains(&segments[start]) {
        start += 1;
    }

    match segments.get(start) {
        Some(segment) => (*segment).to_string(),
        None => "_root".to_string(),
    }
}

pub fn is_entry_point(rel_path: &str) -> bool {
    let base = rel_path.rsplit('/').next().unwrap_or(rel_path);
    let stem = base.rsplit_once('.').map(|(s, _)| s).unwrap_or(base);
    ENTRY_POINT_NAMES.contains(&stem.to_lowercase().as_str())
}

/// Index one file into a complete [`FileEntry`]. The entry is built from
/// scratch every time; callers replace any previous entry wholesale.
pub fn index_file(
    pool: &mut ParserPool,
    language: Language,
    rel_path: &str,
    content: &[u8],
) -> Result<FileEntry> {
    let tree = pool.parse(language, content)?;
    let extractor = languages::extractor_for(language);

    let functions: Vec<FunctionRecord> = extractor
        .functions(&tree, content)
        .iter()
        .map(function_record)
        .collect();
    let imports: Vec<ImportRecord> = extractor
        .imports(&tree, content)
        .into_iter()
        .map(|i| ImportRecord {
            source: i.source,
            symbols: i.symbols,
            is_external: i.is_external,
        })
        .collect();
    let exports: Vec<String> = extractor
        .exports(&tree, content)
        .into_iter()
        .map(|e| e.name)
        .collect();
    let (classes, types) = split_type_records(extractor.types(&tree, content), language);

    let lines = content.iter().filter(|&&b| b == b'\n').count() as u32 + 1;

    Ok(FileEntry {
        language,
        module: module_for_path(rel_path),
        fingerprint: fingerprint(content),
        lines,
        functions,
        classes,
        types,
        imports,
        exports,
        is_entry_point: is_entry_point(rel_path),
    })
}

/// Display signature: name, parameter list, return type when present.
fn function_record(f: &RawFunction) -> FunctionRecord {
    let mut signature = format!("{}({})", f.name, f.params.join(", "));
    if let Some(ret) = &f.ret {
        signature.push_str(" -> ");
        signature.push_str(ret);
    }
    FunctionRecord {
        name: f.name.clone(),
        signature,
        start_line: f.start_line,
        end_line: f.end_line,
    }
}

/// `classes` keeps class and struct declarations; `types` carries every
/// kind except Python classes, so a TypeScript class appears in both lists
/// while a Python class appears only under `classes`.
fn split_type_records(raw: Vec<RawType>, language: Language) -> (Vec<ClassRecord>, Vec<TypeRecord>) {
    let classes = raw
        .iter()
        .filter(|t| matches!(t.kind, "class" | "struct"))
        .map(|t| ClassRecord {
            name: t.name.clone(),
            start_line: t.start_line,
            end_line: t.end_line,
        })
        .collect();

    let types = raw
        .into_iter()
        .filter(|t| !(language == Language::Python && t.kind == "class"))
        .map(|t| TypeRecord {
            name: t.name,
            kind: t.kind.to_string(),
            start_line: t.start_line,
            end_line: t.end_line,
        })
        .collect();

    (classes, types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_from_path() {
        assert_eq!(module_for_path("main.rs"), "_root");
        assert_eq!(module_for_path("src/index.ts"), "_root");
        assert_eq!(module_for_path("src/auth/login.ts"), "auth");
        assert_eq!(module_for_path("utils/helper.ts"), "utils");
        assert_eq!(module_for_path("packages/api/server.ts"), "api");
        assert_eq!(module_for_path("src/lib/db/pool.ts"), "db");
    }

    #[test]
    fn entry_point_names() {
        assert!(is_entry_point("src/main.rs"));
        assert!(is_entry_point("index.ts"));
        assert!(is_entry_point("src/api/server.js"));
        assert!(is_entry_point("Main.java"));
        assert!(!is_entry_point("src/utils.ts"));
    }

    #[test]
    fn signature_includes_return_type_when_present() {
        let with_ret = function_record(&RawFunction {
            name: "greet".to_string(),
            params: vec!["name".to_string(), "age".to_string()],
            ret: Some("string".to_string()),
            start_line: 1,
            end_line: 3,
        });
        assert_eq!(with_ret.signature, "greet(name, age) -> string");

        let without = function_record(&RawFunction {
            name: "noop".to_string(),
            params: vec![],
            ret: None,
            start_line: 5,
            end_line: 6,
        });
        assert_eq!(without.signature, "noop()");
    }

    #[test]
    fn python_class_stays_out_of_types() {
        let raw = vec![
            RawType { name: "MyClass".to_string(), kind: "class", start_line: 1, end_line: 10 },
            RawType { name: "MyEnum".to_string(), kind: "enum", start_line: 12, end_line: 20 },
        ];
        let (classes, types) = split_type_records(raw.clone(), Language::Python);
        assert_eq!(classes.len(), 1);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "MyEnum");

        let (classes, types) = split_type_records(raw, Language::TypeScript);
        assert_eq!(classes.len(), 1);
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn indexes_a_typescript_file() {
        let mut pool = ParserPool::for_languages([Language::TypeScript]).unwrap();
        let src = b"import { db } from './db';\nexport function login(user: string): boolean {\n    return db.check(user);\n}\n";
        let entry = index_file(&mut pool, Language::TypeScript, "src/auth/login.ts", src).unwrap();

        assert_eq!(entry.module, "auth");
        assert_eq!(entry.lines, 5);
        assert!(entry.fingerprint.starts_with("sha256:"));
        assert_eq!(entry.functions.len(), 1);
        assert_eq!(entry.functions[0].signature, "login(user) -> boolean");
        assert_eq!(entry.imports.len(), 1);
        assert!(!entry.imports[0].is_external);
        assert_eq!(entry.exports, vec!["login"]);
        assert!(!entry.is_entry_point);
    }
}
