//! Core types for the class inheritance forest.
//!
//! Nodes are classes, edges point from a class to its resolved base.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::SourceLanguage;

/// Position of a class in the extractor's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Data stored in a forest node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: ClassId,
    /// Qualified name as supplied by the extractor.
    pub name: String,
    pub simple_name: String,
    pub language: SourceLanguage,
    pub is_exposed_controller: bool,
}

/// How a base reference was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Exact qualified-name match.
    Qualified,
    /// Fallback match on the unqualified name across the whole scan.
    SimpleName,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Qualified => write!(f, "qualified"),
            Resolution::SimpleName => write!(f, "simple_name"),
        }
    }
}

/// Data stored on a child -> base edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InheritanceEdge {
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What structural inconsistency was found and how it was recovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The class's base edge closed a cycle; the edge was dropped.
    InheritanceCycle { dropped_base: String },
    /// Several classes matched the reference; the first was taken.
    AmbiguousBase {
        reference: String,
        candidates: Vec<String>,
        chosen: String,
    },
    /// Nothing in the scan matched; the class became a root.
    UnresolvedBase { reference: String },
}

/// A structural diagnostic recorded while building the forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Qualified name of the class the diagnostic is about.
    pub class: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::InheritanceCycle { dropped_base } => format!(
                "inheritance cycle: dropped edge {} -> {}, {} treated as a root",
                self.class, dropped_base, self.class
            ),
            DiagnosticKind::AmbiguousBase {
                reference,
                candidates,
                chosen,
            } => format!(
                "base '{}' of {} matches {} classes ({}), using {}",
                reference,
                self.class,
                candidates.len(),
                candidates.join(", "),
                chosen
            ),
            DiagnosticKind::UnresolvedBase { reference } => format!(
                "base '{}' of {} is not in the scanned sources",
                reference, self.class
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message())
    }
}

/// Summary of a built forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestStats {
    pub class_count: usize,
    pub controller_count: usize,
    pub root_count: usize,
    pub edge_count: usize,
    pub max_depth: usize,
}
