//! Two-phase analysis: build the full class forest, then resolve routes.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::config::RoutemapConfig;
use crate::error::Result;
use crate::graph::{build_forest, Diagnostic, Severity};
use crate::model::ClassDeclaration;
use crate::routes::{detect_conflicts, ConflictReport, ResolvedRoute, RouteResolver};

/// Everything one analysis run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub routes: Vec<ResolvedRoute>,
    pub conflicts: Vec<ConflictReport>,
    pub diagnostics: Vec<Diagnostic>,
    pub class_count: usize,
    pub controller_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub classes: usize,
    pub controllers: usize,
    pub routes: usize,
    pub conflicts: usize,
    pub diagnostics: usize,
    pub warnings: usize,
}

impl AnalysisReport {
    pub fn stats(&self) -> ReportStats {
        ReportStats {
            classes: self.class_count,
            controllers: self.controller_count,
            routes: self.routes.len(),
            conflicts: self.conflicts.len(),
            diagnostics: self.diagnostics.len(),
            warnings: self
                .diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run every stage over a complete scan.
///
/// The forest is finished before any controller is resolved, so a base
/// declared after its subclass is still found.
pub fn analyze(classes: &[ClassDeclaration], config: &RoutemapConfig) -> AnalysisReport {
    let start = Instant::now();

    let forest = build_forest(classes, config);
    let routes = RouteResolver::new(&forest, classes).resolve_all();
    let conflicts = if config.detect_conflicts {
        detect_conflicts(&routes)
    } else {
        Vec::new()
    };

    let report = AnalysisReport {
        class_count: forest.len(),
        controller_count: forest.controllers().len(),
        diagnostics: forest.diagnostics().to_vec(),
        routes,
        conflicts,
    };

    info!(
        classes = report.class_count,
        controllers = report.controller_count,
        routes = report.routes.len(),
        conflicts = report.conflicts.len(),
        diagnostics = report.diagnostics.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::AnnotationKind;
    use crate::model::{MappingAnnotation, MethodDeclaration, SourceLanguage};

    fn duplicated() -> Vec<ClassDeclaration> {
        vec![ClassDeclaration::new("Dup", SourceLanguage::Java)
            .controller()
            .extends("Object")
            .with_method(MethodDeclaration::new("a").with_mapping(
                MappingAnnotation::new(AnnotationKind::GetMapping).with_value("/x"),
            ))
            .with_method(MethodDeclaration::new("b").with_mapping(
                MappingAnnotation::new(AnnotationKind::GetMapping).with_value("/x"),
            ))]
    }

    #[test]
    fn test_analyze_empty_scan() {
        let report = analyze(&[], &RoutemapConfig::default());
        assert_eq!(report, AnalysisReport::default());
        assert_eq!(report.stats(), ReportStats::default());
    }

    #[test]
    fn test_analyze_reports_conflicts_and_stats() {
        let report = analyze(&duplicated(), &RoutemapConfig::default());

        assert!(report.has_conflicts());
        let stats = report.stats();
        assert_eq!(stats.classes, 1);
        assert_eq!(stats.controllers, 1);
        assert_eq!(stats.routes, 2);
        assert_eq!(stats.conflicts, 1);
        // `Object` is a library base: recorded, but not a warning.
        assert_eq!(stats.diagnostics, 1);
        assert_eq!(stats.warnings, 0);
    }

    #[test]
    fn test_conflict_detection_can_be_disabled() {
        let config = RoutemapConfig {
            detect_conflicts: false,
            ..RoutemapConfig::default()
        };
        let report = analyze(&duplicated(), &config);
        assert_eq!(report.routes.len(), 2);
        assert!(!report.has_conflicts());
    }

    #[test]
    fn test_report_json() {
        let report = analyze(&duplicated(), &RoutemapConfig::default());
        let json = report.to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["routes"][0]["http_method"], "GET");
        assert_eq!(value["routes"][0]["path"], "/x");
        assert_eq!(value["conflicts"][0]["handlers"][1]["method_name"], "b");
        assert_eq!(value["diagnostics"][0]["kind"], "unresolved_base");

        let decoded: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, report);
    }
}
