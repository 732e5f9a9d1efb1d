//! Parser acquisition for tree-sitter grammars
//!
//! A `tree_sitter::Parser` carries its active grammar as mutable per-call
//! state, so it is treated as a non-reentrant resource: one parser per
//! language, configured once and held for the session. Configuring the pool
//! is the setup step that can fail; a grammar that cannot be loaded for a
//! language the project actually contains aborts the whole operation before
//! anything is persisted.

use std::collections::HashMap;

use arbor_core::Language;
use thiserror::Error;
use tree_sitter::{Parser, Tree};

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("grammar for {0:?} could not be loaded: {1}")]
    Grammar(Language, tree_sitter::LanguageError),
    #[error("no parser configured for {0:?}")]
    Unconfigured(Language),
    #[error("parser produced no tree for {0:?} input")]
    NoTree(Language),
}

/// The tree-sitter grammar for a language.
pub fn grammar(language: Language) -> tree_sitter::Language {
    match language {
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::Go => tree_sitter_go::LANGUAGE.into(),
        Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        Language::Java => tree_sitter_java::LANGUAGE.into(),
        Language::C => tree_sitter_c::LANGUAGE.into(),
        Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
    }
}

/// One configured parser per language, held for the session.
pub struct ParserPool {
    parsers: HashMap<Language, Parser>,
}

impl ParserPool {
    /// Configure a parser for every given language. Fails on the first
    /// grammar that cannot be loaded.
    pub fn for_languages(
        languages: impl IntoIterator<Item = Language>,
    ) -> Result<Self, ParserError> {
        let mut parsers = HashMap::new();
        for language in languages {
            if parsers.contains_key(&language) {
                continue;
            }
            let mut parser = Parser::new();
            parser
                .set_language(&grammar(language))
                .map_err(|e| ParserError::Grammar(language, e))?;
            parsers.insert(language, parser);
        }
        Ok(ParserPool { parsers })
    }

    /// Parse source bytes with the parser configured for `language`.
    pub fn parse(&mut self, language: Language, source: &[u8]) -> Result<Tree, ParserError> {
        let parser = self
            .parsers
            .get_mut(&language)
            .ok_or(ParserError::Unconfigured(language))?;
        parser.parse(source, None).ok_or(ParserError::NoTree(language))
    }
}
