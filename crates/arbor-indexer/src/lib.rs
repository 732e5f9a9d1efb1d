//! Arbor Indexer — tree-sitter parsing and structural extraction

pub mod builder;
pub mod indexer;
pub mod languages;
pub mod parsers;
pub mod update;
pub mod vcs;
pub mod walk;

pub use builder::scan_project;
pub use indexer::{index_file, is_entry_point, module_for_path};
pub use languages::{extractor_for, LanguageExtractor};
pub use parsers::{ParserError, ParserPool};
pub use update::update_graph;
