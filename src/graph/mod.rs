//! Class graph module: the inheritance forest across every source unit.
//!
//! Provides the forest data model, the engine with its traversal
//! queries, and the builder that resolves base references.

pub mod builder;
pub mod engine;
pub mod types;

pub use builder::build_forest;
pub use engine::ClassForest;
pub use types::{
    ClassId, ClassNode, Diagnostic, DiagnosticKind, ForestStats, InheritanceEdge, Resolution,
    Severity,
};
