//! The class inheritance forest.
//!
//! Uses petgraph to store child -> base edges and keeps name indexes
//! for reference resolution. Every node has at most one outgoing edge
//! and the builder guarantees there are no cycles, so walking base
//! edges from any class always ends at a root.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::types::*;
use crate::model::ClassDeclaration;

pub struct ClassForest {
    /// Child -> base edges. Node index == declaration index.
    graph: DiGraph<ClassNode, InheritanceEdge>,
    /// Index: qualified name -> classes declaring it, in declaration order.
    name_index: HashMap<String, Vec<ClassId>>,
    /// Index: simple name -> classes, in declaration order.
    simple_index: HashMap<String, Vec<ClassId>>,
    diagnostics: Vec<Diagnostic>,
}

impl ClassForest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
            simple_index: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    // ─── Construction ───────────────────────────────────────────

    /// Add a class node. Classes must be added in declaration order.
    pub(crate) fn add_class(&mut self, class: &ClassDeclaration) -> ClassId {
        let id = ClassId(self.graph.node_count());
        let simple_name = class.simple_name().to_string();

        self.graph.add_node(ClassNode {
            id,
            name: class.name.clone(),
            simple_name: simple_name.clone(),
            language: class.language,
            is_exposed_controller: class.is_exposed_controller,
        });

        self.name_index
            .entry(class.name.clone())
            .or_default()
            .push(id);
        self.simple_index.entry(simple_name).or_default().push(id);

        id
    }

    /// Link a class to its resolved base. The caller ensures acyclicity.
    pub(crate) fn add_base_edge(&mut self, child: ClassId, base: ClassId, resolution: Resolution) {
        self.graph.add_edge(
            NodeIndex::new(child.0),
            NodeIndex::new(base.0),
            InheritanceEdge { resolution },
        );
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    // ─── Lookup ─────────────────────────────────────────────────

    /// Number of classes in the forest.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the forest holds no classes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassNode> {
        self.graph.node_weight(NodeIndex::new(id.0))
    }

    /// All classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.graph.node_weights()
    }

    /// Classes whose qualified name is exactly `name`.
    pub fn lookup_qualified(&self, name: &str) -> &[ClassId] {
        self.name_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes whose simple name is `simple_name`.
    pub fn lookup_simple(&self, simple_name: &str) -> &[ClassId] {
        self.simple_index
            .get(simple_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First class matching `name`, qualified match preferred.
    pub fn find(&self, name: &str) -> Option<ClassId> {
        self.lookup_qualified(name)
            .first()
            .or_else(|| self.lookup_simple(name).first())
            .copied()
    }

    // ─── Traversal ──────────────────────────────────────────────

    /// The resolved base of a class, if any.
    pub fn base_of(&self, id: ClassId) -> Option<ClassId> {
        self.base_edge(id).map(|(base, _)| base)
    }

    /// The resolved base together with how it was matched.
    pub fn base_edge(&self, id: ClassId) -> Option<(ClassId, Resolution)> {
        self.graph
            .edges_directed(NodeIndex::new(id.0), Direction::Outgoing)
            .next()
            .map(|edge| (ClassId(edge.target().index()), edge.weight().resolution))
    }

    /// Direct subclasses in declaration order.
    pub fn subclasses_of(&self, id: ClassId) -> Vec<ClassId> {
        let mut children: Vec<ClassId> = self
            .graph
            .edges_directed(NodeIndex::new(id.0), Direction::Incoming)
            .map(|edge| ClassId(edge.source().index()))
            .collect();
        children.sort();
        children
    }

    /// The class itself followed by its ancestors, root last.
    pub fn ancestor_chain(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(base) = self.base_of(current) {
            // Unreachable for forests built by `build_forest`.
            if chain.len() > self.len() {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Number of base edges between the class and its root.
    pub fn depth(&self, id: ClassId) -> usize {
        self.ancestor_chain(id).len() - 1
    }

    /// Classes without a resolved base, in declaration order.
    pub fn roots(&self) -> Vec<ClassId> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|idx| ClassId(idx.index()))
            .collect()
    }

    /// Exposed controller classes, in declaration order.
    pub fn controllers(&self) -> Vec<ClassId> {
        self.classes()
            .filter(|node| node.is_exposed_controller)
            .map(|node| node.id)
            .collect()
    }

    /// Diagnostics recorded while building, in the order they were met.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Summary counts and the deepest chain.
    pub fn stats(&self) -> ForestStats {
        let max_depth = (0..self.len())
            .map(|i| self.depth(ClassId(i)))
            .max()
            .unwrap_or(0);

        ForestStats {
            class_count: self.len(),
            controller_count: self.controllers().len(),
            root_count: self.roots().len(),
            edge_count: self.graph.edge_count(),
            max_depth,
        }
    }
}

impl Default for ClassForest {
    fn default() -> Self {
        Self::new()
    }
}
