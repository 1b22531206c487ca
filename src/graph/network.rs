// src/graph/network.rs
// =============================================================================
// A directed graph whose nodes are identified by a string (a login, a repo
// name, an org name) and whose nodes and edges carry string attributes.
//
// Rules:
// - Nodes are deduplicated by identity. Adding a node that already exists
//   merges the new attributes into the old ones (last write wins)
// - Adding an edge creates missing endpoint nodes (with no attributes)
// - There is at most one edge per (from, to) pair. Re-adding it overwrites
//   the attribute values that were passed again
// - Nothing is ever removed
//
// Storage is a petgraph DiGraph plus a HashMap from identity to NodeIndex.
// =============================================================================

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Attribute name → value, in insertion order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: DiGraph<Node, Attributes>,
    index: HashMap<String, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` if it is new, then merges `attributes` into it.
    pub fn add_node(&mut self, id: &str, attributes: &[(&str, &str)]) -> NodeIndex {
        let idx = self.ensure_node(id);
        merge(&mut self.graph[idx].attributes, attributes);
        idx
    }

    /// Inserts the directed edge `from -> to`, creating either endpoint if
    /// needed. An existing edge is updated instead of duplicated.
    pub fn add_edge(&mut self, from: &str, to: &str, attributes: &[(&str, &str)]) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);

        match self.graph.find_edge(a, b) {
            Some(edge) => merge(&mut self.graph[edge], attributes),
            None => {
                let mut attrs = Attributes::new();
                merge(&mut attrs, attributes);
                self.graph.add_edge(a, b, attrs);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge_attributes(from, to).is_some()
    }

    pub fn node_attributes(&self, id: &str) -> Option<&Attributes> {
        self.index.get(id).map(|&idx| &self.graph[idx].attributes)
    }

    pub fn edge_attributes(&self, from: &str, to: &str) -> Option<&Attributes> {
        let a = *self.index.get(from)?;
        let b = *self.index.get(to)?;
        self.graph.find_edge(a, b).map(|edge| &self.graph[edge])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in insertion order as (from id, to id, attributes).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Attributes)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
                edge.weight(),
            )
        })
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(Node {
            id: id.to_string(),
            attributes: Attributes::new(),
        });
        self.index.insert(id.to_string(), idx);
        idx
    }
}

fn merge(target: &mut Attributes, attributes: &[(&str, &str)]) {
    for (key, value) in attributes {
        target.insert(key.to_string(), value.to_string());
    }
}
