//! Route resolver: composes class and method mappings into routes.
//!
//! Runs after the forest is complete. Each exposed controller is resolved
//! independently (in parallel), then the combined list is sorted back into
//! declaration order.

use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use super::path::compose_path;
use super::types::{ResolvedRoute, RouteOrder};
use crate::graph::{ClassForest, ClassId};
use crate::mapping::normalize;
use crate::model::ClassDeclaration;

pub struct RouteResolver<'a> {
    forest: &'a ClassForest,
    classes: &'a [ClassDeclaration],
}

/// Class-level prefix in effect for one controller.
struct Prefix {
    paths: Vec<String>,
    headers: Vec<String>,
}

impl<'a> RouteResolver<'a> {
    /// `forest` is normally built from `classes`. Ids without a matching
    /// declaration resolve to no routes.
    pub fn new(forest: &'a ClassForest, classes: &'a [ClassDeclaration]) -> Self {
        Self { forest, classes }
    }

    /// Resolve every exposed controller, in declaration order.
    pub fn resolve_all(&self) -> Vec<ResolvedRoute> {
        let controllers = self.forest.controllers();

        let mut routes: Vec<ResolvedRoute> = controllers
            .par_iter()
            .flat_map_iter(|&id| self.resolve_class(id))
            .collect();
        routes.sort_by_key(|route| route.order);

        info!(
            controllers = controllers.len(),
            routes = routes.len(),
            "routes resolved"
        );
        routes
    }

    /// Resolve the routes a single class would serve if exposed.
    pub fn resolve_class(&self, id: ClassId) -> Vec<ResolvedRoute> {
        let Some(controller) = self.classes.get(id.index()) else {
            return Vec::new();
        };

        let chain = self.forest.ancestor_chain(id);
        let prefix = self.class_prefix(&chain);

        let mut routes = Vec::new();
        // Method names declared by more-derived classes.
        let mut shadowed: HashSet<&str> = HashSet::new();

        for (depth, &class_id) in chain.iter().enumerate() {
            let Some(class) = self.classes.get(class_id.index()) else {
                continue;
            };

            let mut declared_here = Vec::new();
            for (method_index, method) in class.methods.iter().enumerate() {
                if shadowed.contains(method.name.as_str()) {
                    continue;
                }
                declared_here.push(method.name.as_str());

                for (mapping_index, annotation) in method.mappings.iter().enumerate() {
                    let raw = normalize(annotation);
                    let verbs = raw.methods.expand();
                    let headers: BTreeSet<String> = prefix
                        .headers
                        .iter()
                        .chain(raw.headers.iter())
                        .cloned()
                        .collect();

                    for (prefix_index, prefix_path) in prefix.paths.iter().enumerate() {
                        for (path_index, method_path) in raw.paths.iter().enumerate() {
                            let path = compose_path(prefix_path, method_path);

                            for (verb_index, verb) in verbs.iter().enumerate() {
                                routes.push(ResolvedRoute {
                                    class: controller.name.clone(),
                                    declared_in: class.name.clone(),
                                    method_name: method.name.clone(),
                                    http_method: verb.clone(),
                                    path: path.clone(),
                                    headers: headers.clone(),
                                    parameters: method.parameters.clone(),
                                    file: class.file.clone(),
                                    lines: method.lines,
                                    order: RouteOrder {
                                        controller: id.index(),
                                        depth,
                                        method: method_index,
                                        mapping: mapping_index,
                                        prefix: prefix_index,
                                        path: path_index,
                                        verb: verb_index,
                                    },
                                });
                            }
                        }
                    }
                }
            }
            shadowed.extend(declared_here);
        }

        debug!(
            class = %controller.name,
            ancestors = chain.len() - 1,
            routes = routes.len(),
            "resolved class"
        );
        routes
    }

    /// The first class-level mapping found walking from the class to the root.
    fn class_prefix(&self, chain: &[ClassId]) -> Prefix {
        chain
            .iter()
            .filter_map(|id| self.classes.get(id.index()))
            .find_map(|class| class.mappings.first())
            .map(|annotation| {
                let raw = normalize(annotation);
                Prefix {
                    paths: raw.paths,
                    headers: raw.headers,
                }
            })
            .unwrap_or_else(|| Prefix {
                paths: vec![String::new()],
                headers: Vec::new(),
            })
    }
}
