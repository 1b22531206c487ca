// src/graph/mod.rs
// =============================================================================
// This module builds the directed networks we export as GEXF files.
//
// Submodules:
// - network: a single directed graph with deduplicated, attributed nodes/edges
// - gexf: serializes a Network to GEXF 1.2 (readable by Gephi, NetworkX, ...)
//
// `GraphBuilder` holds several networks side by side, keyed by a type tag
// such as "full" or "narrow", so one pass over the API can feed all of them.
// =============================================================================

pub mod gexf;
mod network;

pub use network::{Attributes, Network, Node};

use indexmap::IndexMap;

// A set of networks keyed by type tag, kept in the order the tags were created
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graphs: IndexMap<String, Network>,
}

impl GraphBuilder {
    /// Creates a builder with an empty network for each tag.
    pub fn with_tags(tags: &[&str]) -> Self {
        let graphs = tags
            .iter()
            .map(|tag| (tag.to_string(), Network::new()))
            .collect();
        Self { graphs }
    }

    pub fn add_node(&mut self, graph_id: &str, id: &str, attributes: &[(&str, &str)]) {
        self.graph_mut(graph_id).add_node(id, attributes);
    }

    pub fn add_edge(&mut self, graph_id: &str, from: &str, to: &str, attributes: &[(&str, &str)]) {
        self.graph_mut(graph_id).add_edge(from, to, attributes);
    }

    pub fn get(&self, graph_id: &str) -> Option<&Network> {
        self.graphs.get(graph_id)
    }

    pub fn into_graphs(self) -> IndexMap<String, Network> {
        self.graphs
    }

    // Unknown tags get a fresh network
    fn graph_mut(&mut self, graph_id: &str) -> &mut Network {
        self.graphs.entry(graph_id.to_string()).or_default()
    }
}
