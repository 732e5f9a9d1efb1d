//! Arbor Core — graph data model, differ, and impact analysis

pub mod diff;
pub mod graph;
pub mod impact;
pub mod model;
pub mod paths;
pub mod resolve;
pub mod store;

pub use diff::{detect_changes, merge_update, ChangeSet};
pub use impact::{analyze_impact, ImpactResult, TargetKind};
pub use model::{
    fingerprint, now_utc, BuildMeta, ClassRecord, FileEntry, FunctionRecord, Graph, GraphConfig,
    GraphSummary, ImportRecord, Language, Module, ProjectInfo, TypeRecord, SCHEMA_VERSION,
};
pub use resolve::rebuild_dependencies;
pub use store::{load_graph, load_meta, save, StoreError, GRAPH_FILE, META_FILE, OUT_DIR};
