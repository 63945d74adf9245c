//! Forest builder: resolves base references across the whole scan.
//!
//! Must see every class before anything is resolved, since a base may
//! be declared in a unit that comes later in the extractor's output.

use tracing::{debug, info, warn};

use super::engine::ClassForest;
use super::types::*;
use crate::config::RoutemapConfig;
use crate::model::{simple_name_of, ClassDeclaration};

/// Build the inheritance forest for a complete set of classes.
///
/// Never fails: unresolved, ambiguous and cyclic references are recovered
/// in place and recorded as diagnostics on the returned forest.
pub fn build_forest(classes: &[ClassDeclaration], config: &RoutemapConfig) -> ClassForest {
    debug!(class_count = classes.len(), "building class forest");

    // Phase 1: one node per class, in declaration order
    let mut forest = ClassForest::new();
    for class in classes {
        forest.add_class(class);
    }

    // Phase 2: resolve base references against the complete index
    let mut bases: Vec<Option<(ClassId, Resolution)>> = classes
        .iter()
        .enumerate()
        .map(|(i, class)| {
            class
                .base
                .as_deref()
                .and_then(|reference| resolve_base(&mut forest, ClassId(i), class, reference, config))
        })
        .collect();

    // Phase 3: drop edges that close a cycle
    break_cycles(&mut forest, classes, &mut bases);

    // Phase 4: materialize the remaining edges
    for (i, base) in bases.iter().enumerate() {
        if let Some((base, resolution)) = *base {
            forest.add_base_edge(ClassId(i), base, resolution);
        }
    }

    let stats = forest.stats();
    info!(
        classes = stats.class_count,
        controllers = stats.controller_count,
        roots = stats.root_count,
        edges = stats.edge_count,
        diagnostics = forest.diagnostics().len(),
        "class forest built"
    );

    forest
}

/// Strip constructor calls, type arguments and nullability from a reference:
/// `BaseController()` -> `BaseController`, `Base<T>` -> `Base`.
fn clean_reference(reference: &str) -> &str {
    let reference = reference.trim();
    let end = reference
        .find(|c: char| c == '(' || c == '<')
        .unwrap_or(reference.len());
    reference[..end].trim().trim_end_matches('?')
}

/// Two-tier match: qualified name first, then simple name anywhere.
fn resolve_base(
    forest: &mut ClassForest,
    child: ClassId,
    class: &ClassDeclaration,
    reference: &str,
    config: &RoutemapConfig,
) -> Option<(ClassId, Resolution)> {
    let cleaned = clean_reference(reference);
    if cleaned.is_empty() {
        return None;
    }

    // Tier 1: as written, then relative to the child's package
    let mut qualified = vec![cleaned.to_string()];
    if let Some(package) = class.package() {
        qualified.push(format!("{}.{}", package, cleaned));
    }
    let mut names_self = false;
    for name in &qualified {
        let matches = forest.lookup_qualified(name);
        names_self |= matches.contains(&child);
        let candidates = other_than(matches, child);
        if let Some(&first) = candidates.first() {
            record_ambiguity(forest, class, reference, &candidates);
            return Some((first, Resolution::Qualified));
        }
    }

    // Tier 2: simple name across every language in the scan
    let simple = simple_name_of(cleaned);
    let matches = forest.lookup_simple(simple);
    names_self |= matches.contains(&child);
    let candidates = other_than(matches, child);
    if let Some(&first) = candidates.first() {
        record_ambiguity(forest, class, reference, &candidates);
        debug!(
            class = %class.name,
            base = reference,
            resolved = candidates.len(),
            "base resolved by simple name"
        );
        return Some((first, Resolution::SimpleName));
    }

    // The only class answering to the reference is the class itself.
    if names_self {
        warn!(class = %class.name, "class extends itself, dropping edge");
        forest.push_diagnostic(Diagnostic {
            severity: Severity::Warning,
            class: class.name.clone(),
            kind: DiagnosticKind::InheritanceCycle {
                dropped_base: class.name.clone(),
            },
        });
        return None;
    }

    if config.report_unresolved_bases {
        let severity = if config.is_library_base(simple) {
            Severity::Info
        } else {
            Severity::Warning
        };
        if severity == Severity::Warning {
            warn!(class = %class.name, base = reference, "base class not found in scan");
        } else {
            debug!(class = %class.name, base = reference, "library base outside scan");
        }
        forest.push_diagnostic(Diagnostic {
            severity,
            class: class.name.clone(),
            kind: DiagnosticKind::UnresolvedBase {
                reference: reference.to_string(),
            },
        });
    }

    None
}

fn other_than(ids: &[ClassId], child: ClassId) -> Vec<ClassId> {
    ids.iter().copied().filter(|&id| id != child).collect()
}

fn record_ambiguity(
    forest: &mut ClassForest,
    class: &ClassDeclaration,
    reference: &str,
    candidates: &[ClassId],
) {
    if candidates.len() < 2 {
        return;
    }

    let names: Vec<String> = candidates
        .iter()
        .filter_map(|&id| forest.class(id).map(|node| node.name.clone()))
        .collect();
    let chosen = names.first().cloned().unwrap_or_default();

    warn!(
        class = %class.name,
        base = reference,
        candidates = names.len(),
        chosen = %chosen,
        "ambiguous base reference"
    );
    forest.push_diagnostic(Diagnostic {
        severity: Severity::Warning,
        class: class.name.clone(),
        kind: DiagnosticKind::AmbiguousBase {
            reference: reference.to_string(),
            candidates: names,
            chosen,
        },
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Walk base edges from every class; an edge pointing back onto the
/// current path is dropped and its source becomes a root.
fn break_cycles(
    forest: &mut ClassForest,
    classes: &[ClassDeclaration],
    bases: &mut [Option<(ClassId, Resolution)>],
) {
    let mut marks = vec![Mark::Unvisited; bases.len()];

    for start in 0..bases.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        let mut path = Vec::new();
        let mut current = start;
        loop {
            marks[current] = Mark::OnPath;
            path.push(current);

            let Some((base, _)) = bases[current] else {
                break;
            };
            match marks[base.0] {
                Mark::Unvisited => current = base.0,
                Mark::Done => break,
                Mark::OnPath => {
                    let class = &classes[current].name;
                    let dropped = &classes[base.0].name;
                    warn!(class = %class, base = %dropped, "inheritance cycle, dropping edge");
                    forest.push_diagnostic(Diagnostic {
                        severity: Severity::Warning,
                        class: class.clone(),
                        kind: DiagnosticKind::InheritanceCycle {
                            dropped_base: dropped.clone(),
                        },
                    });
                    bases[current] = None;
                    break;
                }
            }
        }

        for node in path {
            marks[node] = Mark::Done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceLanguage;

    fn java(name: &str) -> ClassDeclaration {
        ClassDeclaration::new(name, SourceLanguage::Java)
    }

    fn kotlin(name: &str) -> ClassDeclaration {
        ClassDeclaration::new(name, SourceLanguage::Kotlin)
    }

    fn build(classes: &[ClassDeclaration]) -> ClassForest {
        build_forest(classes, &RoutemapConfig::default())
    }

    #[test]
    fn test_clean_reference() {
        assert_eq!(clean_reference("BaseController()"), "BaseController");
        assert_eq!(clean_reference(" Base<User, Long> "), "Base");
        assert_eq!(clean_reference("com.x.Base(repo)"), "com.x.Base");
        assert_eq!(clean_reference("Base?"), "Base");
    }

    #[test]
    fn test_qualified_match() {
        let classes = vec![
            java("com.example.BaseController"),
            java("com.example.UserController").extends("com.example.BaseController"),
        ];
        let forest = build(&classes);

        assert_eq!(
            forest.base_edge(ClassId(1)),
            Some((ClassId(0), Resolution::Qualified))
        );
        assert!(forest.diagnostics().is_empty());
    }

    #[test]
    fn test_same_package_match_beats_simple_name() {
        let classes = vec![
            java("com.other.BaseController"),
            java("com.example.BaseController"),
            java("com.example.UserController").extends("BaseController"),
        ];
        let forest = build(&classes);

        assert_eq!(
            forest.base_edge(ClassId(2)),
            Some((ClassId(1), Resolution::Qualified))
        );
        assert!(forest.diagnostics().is_empty());
    }

    #[test]
    fn test_cross_language_simple_name_fallback() {
        // Kotlin child refers to a Java base through a constructor call.
        let classes = vec![
            kotlin("com.example.demo.controller.KotlinChildController")
                .extends("JavaParentClass()"),
            java("com.example.demo.parent.JavaParentClass"),
        ];
        let forest = build(&classes);

        assert_eq!(
            forest.base_edge(ClassId(0)),
            Some((ClassId(1), Resolution::SimpleName))
        );
        assert_eq!(forest.roots(), vec![ClassId(1)]);
    }

    #[test]
    fn test_base_declared_after_child() {
        let classes = vec![java("Child").extends("Parent"), java("Parent").extends("GrandParent"), java("GrandParent")];
        let forest = build(&classes);

        assert_eq!(
            forest.ancestor_chain(ClassId(0)),
            vec![ClassId(0), ClassId(1), ClassId(2)]
        );
    }

    #[test]
    fn test_ambiguous_simple_name_takes_first() {
        let classes = vec![
            java("com.a.Base"),
            kotlin("com.b.Base"),
            java("com.c.Child").extends("Base"),
        ];
        let forest = build(&classes);

        assert_eq!(forest.base_of(ClassId(2)), Some(ClassId(0)));
        assert_eq!(forest.diagnostics().len(), 1);

        let diagnostic = &forest.diagnostics()[0];
        assert_eq!(diagnostic.class, "com.c.Child");
        assert_eq!(diagnostic.severity, Severity::Warning);
        match &diagnostic.kind {
            DiagnosticKind::AmbiguousBase {
                candidates, chosen, ..
            } => {
                assert_eq!(candidates, &vec!["com.a.Base".to_string(), "com.b.Base".to_string()]);
                assert_eq!(chosen, "com.a.Base");
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_base_severity() {
        let classes = vec![
            java("SpringStandardParentController").extends("AbstractAuditable<User, Long>"),
            java("MissingParentController").extends("NonExistentParentClass"),
        ];
        let forest = build(&classes);

        assert_eq!(forest.roots(), vec![ClassId(0), ClassId(1)]);
        let severities: Vec<Severity> = forest.diagnostics().iter().map(|d| d.severity).collect();
        assert_eq!(severities, vec![Severity::Info, Severity::Warning]);
        assert!(forest.diagnostics()[1]
            .message()
            .contains("NonExistentParentClass"));
    }

    #[test]
    fn test_unresolved_reporting_can_be_disabled() {
        let config = RoutemapConfig {
            report_unresolved_bases: false,
            ..RoutemapConfig::default()
        };
        let forest = build_forest(&[java("A").extends("Missing")], &config);
        assert!(forest.diagnostics().is_empty());
        assert_eq!(forest.roots(), vec![ClassId(0)]);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let quiet = RoutemapConfig {
            report_unresolved_bases: false,
            ..RoutemapConfig::default()
        };
        for config in [RoutemapConfig::default(), quiet] {
            let forest = build_forest(&[java("Loop").extends("Loop")], &config);
            assert_eq!(forest.base_of(ClassId(0)), None);
            assert_eq!(forest.roots(), vec![ClassId(0)]);
            assert_eq!(
                forest.diagnostics(),
                &[Diagnostic {
                    severity: Severity::Warning,
                    class: "Loop".to_string(),
                    kind: DiagnosticKind::InheritanceCycle {
                        dropped_base: "Loop".to_string()
                    },
                }]
            );
        }
    }

    #[test]
    fn test_self_named_base_prefers_other_class() {
        let classes = vec![
            java("com.app.Handler").extends("Handler"),
            kotlin("com.lib.Handler"),
        ];
        let forest = build(&classes);

        assert_eq!(forest.base_of(ClassId(0)), Some(ClassId(1)));
        assert!(forest.diagnostics().is_empty());
    }

    #[test]
    fn test_two_class_cycle_is_broken() {
        let classes = vec![java("A").extends("B"), java("B").extends("A")];
        let forest = build(&classes);

        // Walking from A reaches B, whose edge back to A is dropped.
        assert_eq!(forest.base_of(ClassId(0)), Some(ClassId(1)));
        assert_eq!(forest.base_of(ClassId(1)), None);
        assert_eq!(forest.roots(), vec![ClassId(1)]);

        assert_eq!(forest.diagnostics().len(), 1);
        assert_eq!(forest.diagnostics()[0].class, "B");
        assert_eq!(
            forest.diagnostics()[0].kind,
            DiagnosticKind::InheritanceCycle {
                dropped_base: "A".to_string()
            }
        );
    }

    #[test]
    fn test_cycle_with_tail() {
        // Tail -> A -> B -> C -> A
        let classes = vec![
            java("Tail").extends("A"),
            java("A").extends("B"),
            java("B").extends("C"),
            java("C").extends("A"),
        ];
        let forest = build(&classes);

        assert_eq!(
            forest.ancestor_chain(ClassId(0)),
            vec![ClassId(0), ClassId(1), ClassId(2), ClassId(3)]
        );
        assert_eq!(forest.roots(), vec![ClassId(3)]);
        assert_eq!(forest.diagnostics().len(), 1);
        assert_eq!(forest.diagnostics()[0].class, "C");
    }

    #[test]
    fn test_every_chain_terminates() {
        let classes = vec![
            java("A").extends("B"),
            java("B").extends("C"),
            java("C").extends("A"),
            java("D").extends("E"),
            java("E").extends("D"),
            java("F").extends("F"),
        ];
        let forest = build(&classes);

        for i in 0..classes.len() {
            let chain = forest.ancestor_chain(ClassId(i));
            assert!(chain.len() <= classes.len());
            let root = *chain.last().unwrap();
            assert_eq!(forest.base_of(root), None);
        }
    }
}
