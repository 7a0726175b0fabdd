//! In-memory assembly graph
//!
//! A directed graph whose vertices are segment endpoints (`<name>_start`,
//! `<name>_end`) and whose edges are either intra-segment or GFA links.
//! Vertices are addressed by name; the graph keeps its own name index.

use crate::attrs::Attributes;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// A graph vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Node name, e.g. `tig00000001_start`
    pub name: String,
    /// Node attributes
    pub attrs: Attributes,
}

/// Borrowed view of an edge and its endpoints
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub from: &'a Node,
    pub to: &'a Node,
    pub attrs: &'a Attributes,
}

/// Node and edge counts reported once parsing is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

impl GraphSummary {
    /// Export the counts as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nodes:{} Edges:{}", self.nodes, self.edges)
    }
}

/// Directed assembly graph
#[derive(Debug, Clone, Default)]
pub struct AssemblyGraph {
    graph: DiGraph<Node, Attributes>,
    index: HashMap<String, NodeIndex>,
}

impl AssemblyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the node named `name`, creating an attribute-less one if absent
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(Node {
            name: name.to_string(),
            attrs: Attributes::new(),
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Add the edge `from -> to`.
    ///
    /// Missing endpoints are created without attributes. If the ordered pair
    /// already has an edge, its attributes are replaced instead of adding a
    /// parallel edge.
    pub fn add_edge(&mut self, from: &str, to: &str, attrs: Attributes) -> EdgeIndex {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.update_edge(a, b, attrs)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        let idx = *self.index.get(name)?;
        Some(&mut self.graph[idx])
    }

    /// Attributes of the edge `from -> to`, if present
    pub fn edge(&self, from: &str, to: &str) -> Option<&Attributes> {
        let a = *self.index.get(from)?;
        let b = *self.index.get(to)?;
        self.graph.find_edge(a, b).map(|e| &self.graph[e])
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge(from, to).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_references().map(move |e| EdgeView {
            from: &self.graph[e.source()],
            to: &self.graph[e.target()],
            attrs: e.weight(),
        })
    }

    /// Position of a node in insertion order, used as a dense id by
    /// layout and export
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|idx| idx.index())
    }

    /// Edges as pairs of dense node ids
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;

    fn attrs(weight: i64) -> Attributes {
        let mut a = Attributes::new();
        a.insert("weight".to_string(), AttrValue::Int(weight));
        a
    }

    #[test]
    fn test_ensure_node_idempotent() {
        let mut graph = AssemblyGraph::new();
        let a = graph.ensure_node("a_start");
        let b = graph.ensure_node("a_start");
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph = AssemblyGraph::new();
        graph.add_edge("x_end", "y_start", attrs(2));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.node("x_end").unwrap().attrs.is_empty());
        assert!(graph.contains_edge("x_end", "y_start"));
        assert!(!graph.contains_edge("y_start", "x_end"));
    }

    #[test]
    fn test_add_edge_last_write_wins() {
        let mut graph = AssemblyGraph::new();
        graph.add_edge("a", "b", attrs(2));
        graph.add_edge("a", "b", attrs(7));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge("a", "b").unwrap()["weight"], AttrValue::Int(7));
    }

    #[test]
    fn test_iteration_order() {
        let mut graph = AssemblyGraph::new();
        graph.ensure_node("n1");
        graph.ensure_node("n2");
        graph.add_edge("n2", "n1", attrs(1));

        let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["n1", "n2"]);
        assert_eq!(graph.position("n2"), Some(1));
        assert_eq!(graph.edge_endpoints().collect::<Vec<_>>(), vec![(1, 0)]);

        let edge = graph.edges().next().unwrap();
        assert_eq!(edge.from.name, "n2");
        assert_eq!(edge.to.name, "n1");
    }

    #[test]
    fn test_summary() {
        let mut graph = AssemblyGraph::new();
        graph.add_edge("a", "b", attrs(1));
        let summary = graph.summary();
        assert_eq!(summary.to_string(), "Nodes:2 Edges:1");
        assert!(summary.to_json().unwrap().contains("\"edges\": 1"));
    }
}
