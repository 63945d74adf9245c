//! Ambiguity detector: finds routes registered more than once.
//!
//! Routes are grouped by (HTTP method, path). Inside a group, header token
//! sets only separate routes when they differ as sets; no attempt is made to
//! decide whether two different header predicates could match one request.

use std::collections::HashMap;
use tracing::debug;

use super::types::{ConflictReport, HandlerRef, ResolvedRoute, RouteSignature};

/// One method declaration as served by one controller. Same-named
/// overloads in a class are distinct declarations.
#[derive(PartialEq, Eq)]
struct DeclarationKey<'a> {
    class: &'a str,
    declared_in: &'a str,
    method_name: &'a str,
    depth: usize,
    method: usize,
}

impl<'a> DeclarationKey<'a> {
    fn of(route: &'a ResolvedRoute) -> Self {
        Self {
            class: &route.class,
            declared_in: &route.declared_in,
            method_name: &route.method_name,
            depth: route.order.depth,
            method: route.order.method,
        }
    }
}

/// Report every signature claimed by two or more distinct method
/// declarations.
///
/// Reports come out in the order of their first route, handlers in route
/// order. A declaration that produces the same signature twice (for
/// example through a repeated path value) is counted once.
pub fn detect_conflicts(routes: &[ResolvedRoute]) -> Vec<ConflictReport> {
    let mut groups: HashMap<RouteSignature, Vec<(DeclarationKey<'_>, HandlerRef)>> =
        HashMap::new();
    let mut first_seen: Vec<RouteSignature> = Vec::new();

    for route in routes {
        let signature = route.signature();
        if !groups.contains_key(&signature) {
            first_seen.push(signature.clone());
        }

        let handlers = groups.entry(signature).or_default();
        let key = DeclarationKey::of(route);
        if !handlers.iter().any(|(seen, _)| *seen == key) {
            handlers.push((key, route.handler()));
        }
    }

    let reports: Vec<ConflictReport> = first_seen
        .into_iter()
        .filter_map(|signature| {
            let handlers = groups.remove(&signature)?;
            (handlers.len() >= 2).then(|| ConflictReport {
                signature,
                handlers: handlers.into_iter().map(|(_, handler)| handler).collect(),
            })
        })
        .collect();

    debug!(
        routes = routes.len(),
        conflicts = reports.len(),
        "ambiguity check complete"
    );
    reports
}
