//! # Routemap
//!
//! Endpoint inventory for Spring-style controllers written in Java and
//! Kotlin, computed from extracted annotations without compiling or running
//! the application.
//!
//! ## Stages
//!
//! - **Graph**: resolves base-class references across files and languages
//!   into one inheritance forest
//! - **Mapping**: turns heterogeneous annotation data into canonical records
//! - **Routes**: composes class and method mappings into concrete
//!   (HTTP method, path) routes and flags duplicate registrations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use routemap::{analyze, ClassModel, RoutemapConfig};
//!
//! let json = std::fs::read_to_string("model.json").unwrap();
//! let model = ClassModel::from_json(&json).unwrap();
//!
//! let report = analyze(&model.classes, &RoutemapConfig::default());
//! for route in &report.routes {
//!     println!("{}", route);
//! }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod routes;

// Re-exports for convenience
pub use config::RoutemapConfig;
pub use error::{Result, RoutemapError};
pub use model::{
    AttributeValue, ClassDeclaration, ClassModel, LineRange, MappingAnnotation,
    MethodDeclaration, Parameter, SourceLanguage,
};

// Graph re-exports
pub use graph::{build_forest, ClassForest, ClassId, Diagnostic, DiagnosticKind, Severity};

// Mapping re-exports
pub use mapping::{normalize, AnnotationKind, HttpMethod, RawMapping, RequestMethods};

// Route re-exports
pub use pipeline::{analyze, AnalysisReport, ReportStats};
pub use routes::{
    compose_path, detect_conflicts, ConflictReport, HandlerRef, ResolvedRoute, RouteResolver,
    RouteSignature,
};
